use anyhow::{Context, Result};

use crate::Config;

/// Validate the config and the storage directory before a run would.
pub fn doctor(cfg: &Config) -> Result<()> {
    let resolved = cfg.resolve()?;

    std::fs::create_dir_all(&resolved.storage_dir)
        .with_context(|| format!("create storage dir {}", resolved.storage_dir.display()))?;

    // Snapshot writes are fatal when they fail; probe for that up front.
    let probe = resolved.storage_dir.join(".doctor-probe");
    std::fs::write(&probe, b"ok")
        .with_context(|| format!("storage dir {} is not writable", resolved.storage_dir.display()))?;
    std::fs::remove_file(&probe).ok();
    Ok(())
}
