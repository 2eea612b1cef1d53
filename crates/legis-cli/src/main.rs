use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use legis_diff::StructuralComparator;
use legis_runner::{doctor, Config, Runner};

#[derive(Parser)]
#[command(name = "legis", version)]
struct Cli {
    /// Path to the config file (written with defaults if missing)
    #[arg(long, global = true, default_value = "legis.toml")]
    config: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default config and create the storage directory
    Init,

    /// Validate config and storage-directory writability
    Doctor,

    /// One poll cycle: fetch, snapshot, compare against the previous snapshot
    Run {
        /// Record field-level JSON changes instead of a unified diff
        #[arg(long, default_value_t = false)]
        structural: bool,
    },

    /// Show the snapshot index for the configured location
    Status,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Init => {
            let cfg = Config::load_or_init(&cli.config)?;
            doctor(&cfg)?;
            println!("Initialized tracker config at {}", cli.config.display());
        }
        Command::Doctor => {
            let cfg = Config::load_or_init(&cli.config)?;
            doctor(&cfg)?;
            println!("OK");
        }
        Command::Run { structural } => {
            let cfg = Config::load_or_init(&cli.config)?;
            let mut runner = Runner::open(cfg)?;
            if structural {
                runner.comparator = Box::new(StructuralComparator);
            }
            let report = runner.run_once()?;
            println!("Snapshot: {}", report.snapshot_path.display());
            match (&report.compared_with, &report.change_record) {
                (None, _) => println!("No previous snapshot; comparison skipped."),
                (Some(prev), None) => println!("No changes since {}.", prev.display()),
                (Some(_), Some(change)) => println!("Changes: {}", change.display()),
            }
        }
        Command::Status => {
            let cfg = Config::load_or_init(&cli.config)?;
            let runner = Runner::open(cfg)?;
            let index = runner.store.index()?;
            println!(
                "{}: {} snapshot(s)",
                runner.cfg.location.describe(),
                index.entries.len()
            );
            for entry in index.entries.iter().rev().take(5) {
                println!("- {}", entry.stamp.as_str());
            }
        }
    }

    Ok(())
}
