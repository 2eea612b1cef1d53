use std::path::PathBuf;

use anyhow::Result;
use tracing::{info, warn};

use legis_core::{default_endpoints, SnapshotStamp};
use legis_diff::{SnapshotComparator, TextComparator};
use legis_fetch::{collect_snapshot, HttpSource, PayloadSource};
use legis_store::FsSnapshotStore;

use crate::Config;

/// What one run produced. A missing `change_record` after a comparison means
/// the snapshots were identical (or the comparator failed and was absorbed).
#[derive(Debug)]
pub struct RunReport {
    pub stamp: SnapshotStamp,
    pub snapshot_path: PathBuf,
    pub compared_with: Option<PathBuf>,
    pub change_record: Option<PathBuf>,
}

pub struct Runner {
    pub cfg: crate::ResolvedConfig,
    pub store: FsSnapshotStore,
    pub source: Box<dyn PayloadSource>,
    pub comparator: Box<dyn SnapshotComparator>,
    pub endpoints: Vec<String>,
}

impl Runner {
    /// Validate the config and wire up the default HTTP fetcher and textual
    /// comparator. Fails before any I/O on an unsupported jurisdiction.
    pub fn open(cfg: Config) -> Result<Self> {
        let resolved = cfg.resolve()?;
        let store = FsSnapshotStore::open(resolved.storage_dir.clone())?;
        let source = Box::new(HttpSource::new(resolved.base_url.clone()));
        Ok(Self {
            cfg: resolved,
            store,
            source,
            comparator: Box::new(TextComparator),
            endpoints: default_endpoints(),
        })
    }

    pub fn run_once(&self) -> Result<RunReport> {
        self.run_at(SnapshotStamp::now())
    }

    /// One full cycle: fetch all endpoints, write the snapshot, locate the
    /// previous one, and record the diff when there is one. Only snapshot
    /// write failures abort; fetch and comparator failures are downgraded.
    pub fn run_at(&self, stamp: SnapshotStamp) -> Result<RunReport> {
        info!(
            "running legislative tracker for {} at {}",
            self.cfg.location.describe(),
            stamp.as_str()
        );

        let snapshot = collect_snapshot(self.source.as_ref(), &self.endpoints);
        let snapshot_path = self.store.write_snapshot(&stamp, &snapshot)?;

        let Some(previous) = self.store.previous_snapshot()? else {
            info!("no previous snapshot found, skipping comparison");
            return Ok(RunReport {
                stamp,
                snapshot_path,
                compared_with: None,
                change_record: None,
            });
        };

        info!("comparing {} with {}", previous.display(), snapshot_path.display());
        let change_record = match self.comparator.compare(&previous, &snapshot_path) {
            Ok(Some(report)) => {
                info!("changes detected, saving change record");
                Some(
                    self.store
                        .write_change_record(&stamp, report.extension, &report.body)?,
                )
            }
            Ok(None) => {
                info!("no changes detected");
                None
            }
            Err(err) => {
                warn!("comparison failed, treating as no changes: {:#}", err);
                None
            }
        };

        Ok(RunReport {
            stamp,
            snapshot_path,
            compared_with: Some(previous),
            change_record,
        })
    }
}
