use std::path::Path;

use anyhow::Result;

/// Output of a comparison: the record body plus the file extension it should
/// be stored under ("diff" for unified-diff text, "json" for structural
/// summaries).
#[derive(Clone, Debug)]
pub struct ChangeReport {
    pub body: String,
    pub extension: &'static str,
}

/// Compares two snapshot files. `Ok(None)` means no changes, in which case
/// no change record is written.
pub trait SnapshotComparator: Send + Sync {
    fn compare(&self, old: &Path, new: &Path) -> Result<Option<ChangeReport>>;
}
