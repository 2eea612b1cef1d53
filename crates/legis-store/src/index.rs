use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use legis_core::SnapshotStamp;

pub const INDEX_FILENAME: &str = "index.json";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IndexEntry {
    pub stamp: SnapshotStamp,
    pub file: String,
}

/// Manifest of snapshots in a storage directory, appended on every write.
/// Entries are kept in write order, which is chronological order because
/// stamps come from a monotonically read clock within one directory.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SnapshotIndex {
    pub entries: Vec<IndexEntry>,
}

impl SnapshotIndex {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let bytes = std::fs::read(path)?;
        let idx: Self = serde_json::from_slice(&bytes)?;
        Ok(idx)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let bytes = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    pub fn push(&mut self, stamp: SnapshotStamp, file: String) {
        self.entries.push(IndexEntry { stamp, file });
    }

    /// The snapshot immediately preceding the latest one, i.e. the comparison
    /// target for the snapshot just written. `None` with fewer than two.
    pub fn previous(&self) -> Option<&IndexEntry> {
        if self.entries.len() < 2 {
            return None;
        }
        self.entries.get(self.entries.len() - 2)
    }

    pub fn latest(&self) -> Option<&IndexEntry> {
        self.entries.last()
    }

    /// Rebuild from the snapshot files present in `dir`. Used when the index
    /// file is missing, e.g. a directory written before the index existed.
    /// Filenames sort chronologically because the stamp is fixed-width.
    pub fn rebuild_from_dir(dir: &Path) -> Result<Self> {
        let mut stamps: Vec<SnapshotStamp> = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(stamp) = SnapshotStamp::from_snapshot_filename(name) {
                stamps.push(stamp);
            }
        }
        stamps.sort();
        let entries = stamps
            .into_iter()
            .map(|stamp| {
                let file = stamp.snapshot_filename();
                IndexEntry { stamp, file }
            })
            .collect();
        Ok(Self { entries })
    }
}
