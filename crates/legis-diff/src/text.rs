use std::path::Path;

use anyhow::{Context, Result};
use similar::TextDiff;

use crate::comparator::{ChangeReport, SnapshotComparator};

/// Default comparator: line-oriented unified diff of the raw file contents,
/// computed in-process.
#[derive(Clone, Debug, Default)]
pub struct TextComparator;

impl SnapshotComparator for TextComparator {
    fn compare(&self, old: &Path, new: &Path) -> Result<Option<ChangeReport>> {
        let old_text = std::fs::read_to_string(old)
            .with_context(|| format!("read {}", old.display()))?;
        let new_text = std::fs::read_to_string(new)
            .with_context(|| format!("read {}", new.display()))?;
        if old_text == new_text {
            return Ok(None);
        }

        let diff = TextDiff::from_lines(&old_text, &new_text);
        let body = diff
            .unified_diff()
            .context_radius(3)
            .header(&old.display().to_string(), &new.display().to_string())
            .to_string();
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(ChangeReport {
            body,
            extension: "diff",
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn identical_files_produce_no_report() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        std::fs::write(&a, "{\n  \"x\": 1\n}\n").unwrap();
        std::fs::write(&b, "{\n  \"x\": 1\n}\n").unwrap();
        assert!(TextComparator.compare(&a, &b).unwrap().is_none());
    }

    #[test]
    fn changed_line_appears_in_report() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        std::fs::write(&a, "{\n  \"x\": 1\n}\n").unwrap();
        std::fs::write(&b, "{\n  \"x\": 2\n}\n").unwrap();
        let report = TextComparator.compare(&a, &b).unwrap().unwrap();
        assert_eq!(report.extension, "diff");
        assert!(report.body.contains("-  \"x\": 1"));
        assert!(report.body.contains("+  \"x\": 2"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.json");
        std::fs::write(&a, "{}").unwrap();
        let missing = dir.path().join("gone.json");
        assert!(TextComparator.compare(&a, &missing).is_err());
    }
}
