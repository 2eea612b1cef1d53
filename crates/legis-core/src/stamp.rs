use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Fixed-width timestamp format. Zero-padded so that lexical order on the
/// rendered string matches chronological order.
pub const STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Identifies one snapshot. Wraps the rendered timestamp string that appears
/// in snapshot and change-record filenames.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SnapshotStamp(pub String);

impl SnapshotStamp {
    pub fn now() -> Self {
        Self::from_datetime(chrono::Local::now().naive_local())
    }

    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        Self(dt.format(STAMP_FORMAT).to_string())
    }

    pub fn from_str(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn snapshot_filename(&self) -> String {
        format!("legislation_{}.json", self.0)
    }

    /// Change-record filename; extension depends on the comparator output
    /// ("diff" for textual records, "json" for structural ones).
    pub fn change_filename(&self, extension: &str) -> String {
        format!("changes_{}.{}", self.0, extension)
    }

    /// Recover the stamp from a `legislation_*.json` filename, if it is one.
    pub fn from_snapshot_filename(name: &str) -> Option<Self> {
        let stem = name.strip_prefix("legislation_")?.strip_suffix(".json")?;
        if stem.is_empty() {
            return None;
        }
        Some(Self(stem.to_string()))
    }
}
