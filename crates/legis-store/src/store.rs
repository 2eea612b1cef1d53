use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use legis_core::{Snapshot, SnapshotStamp};

use crate::index::{SnapshotIndex, INDEX_FILENAME};

/// Filesystem store for one storage directory. Snapshots are immutable once
/// written; the index manifest is the only file rewritten in place.
#[derive(Clone)]
pub struct FsSnapshotStore {
    pub dir: PathBuf,
}

impl FsSnapshotStore {
    pub fn open(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create storage dir {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn index_path(&self) -> PathBuf {
        self.dir.join(INDEX_FILENAME)
    }

    /// Load the index, rebuilding it from a directory scan when the manifest
    /// file is absent but snapshot files are present.
    pub fn index(&self) -> Result<SnapshotIndex> {
        let path = self.index_path();
        if path.exists() {
            return SnapshotIndex::load(&path);
        }
        SnapshotIndex::rebuild_from_dir(&self.dir)
    }

    /// Serialize the snapshot as indented JSON and record it in the index.
    /// Write failures are fatal to the run and propagate.
    pub fn write_snapshot(&self, stamp: &SnapshotStamp, snapshot: &Snapshot) -> Result<PathBuf> {
        // Load (or rebuild) the index before the file lands on disk, so a
        // directory-scan rebuild never counts the snapshot being written.
        let mut index = self.index()?;

        let path = self.dir.join(stamp.snapshot_filename());
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        std::fs::write(&path, bytes)
            .with_context(|| format!("write snapshot {}", path.display()))?;

        index.push(stamp.clone(), stamp.snapshot_filename());
        index.save(&self.index_path())?;
        Ok(path)
    }

    /// The snapshot immediately preceding the one just written, if any.
    pub fn previous_snapshot(&self) -> Result<Option<PathBuf>> {
        let index = self.index()?;
        Ok(index.previous().map(|e| self.dir.join(&e.file)))
    }

    pub fn write_change_record(
        &self,
        stamp: &SnapshotStamp,
        extension: &str,
        body: &str,
    ) -> Result<PathBuf> {
        let path = self.dir.join(stamp.change_filename(extension));
        std::fs::write(&path, body)
            .with_context(|| format!("write change record {}", path.display()))?;
        Ok(path)
    }

    pub fn read_snapshot(path: &Path) -> Result<Snapshot> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read snapshot {}", path.display()))?;
        let snapshot: Snapshot = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse snapshot {}", path.display()))?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn s(n: u32) -> SnapshotStamp {
        SnapshotStamp::from_str(format!("2026-01-0{}_00-00-00", n))
    }

    #[test]
    fn snapshot_roundtrips_exactly() {
        let dir = tempdir().unwrap();
        let store = FsSnapshotStore::open(dir.path().to_path_buf()).unwrap();

        let mut snap = Snapshot::new();
        snap.insert("Measures".into(), json!({"value": [{"id": 1, "deep": {"a": []}}]}));
        snap.insert("Committees".into(), json!({}));
        snap.insert("FloorLetters".into(), serde_json::Value::Null);

        let path = store.write_snapshot(&s(1), &snap).unwrap();
        let read_back = FsSnapshotStore::read_snapshot(&path).unwrap();
        assert_eq!(read_back, snap);
    }

    #[test]
    fn previous_returns_second_newest() {
        let dir = tempdir().unwrap();
        let store = FsSnapshotStore::open(dir.path().to_path_buf()).unwrap();
        let snap = Snapshot::new();
        for n in [1u32, 2, 3, 4] {
            store.write_snapshot(&s(n), &snap).unwrap();
        }
        let prev = store.previous_snapshot().unwrap().unwrap();
        assert_eq!(
            prev.file_name().unwrap().to_str().unwrap(),
            s(3).snapshot_filename()
        );
    }

    #[test]
    fn previous_is_none_with_fewer_than_two() {
        let dir = tempdir().unwrap();
        let store = FsSnapshotStore::open(dir.path().to_path_buf()).unwrap();
        assert!(store.previous_snapshot().unwrap().is_none());
        store.write_snapshot(&s(1), &Snapshot::new()).unwrap();
        assert!(store.previous_snapshot().unwrap().is_none());
    }

    #[test]
    fn first_write_is_not_its_own_previous() {
        let dir = tempdir().unwrap();
        let store = FsSnapshotStore::open(dir.path().to_path_buf()).unwrap();
        store.write_snapshot(&s(1), &Snapshot::new()).unwrap();
        let index = store.index().unwrap();
        assert_eq!(index.entries.len(), 1);
        assert!(store.previous_snapshot().unwrap().is_none());
    }

    #[test]
    fn write_into_pre_index_dir_keeps_second_newest_as_previous() {
        let dir = tempdir().unwrap();
        // Directory written before the index existed: snapshot files only.
        for n in [1u32, 2] {
            std::fs::write(dir.path().join(s(n).snapshot_filename()), b"{}").unwrap();
        }
        let store = FsSnapshotStore::open(dir.path().to_path_buf()).unwrap();
        store.write_snapshot(&s(3), &Snapshot::new()).unwrap();

        let index = store.index().unwrap();
        let stamps: Vec<_> = index.entries.iter().map(|e| e.stamp.clone()).collect();
        assert_eq!(stamps, vec![s(1), s(2), s(3)]);

        let prev = store.previous_snapshot().unwrap().unwrap();
        assert_eq!(
            prev.file_name().unwrap().to_str().unwrap(),
            s(2).snapshot_filename()
        );
    }

    #[test]
    fn missing_index_falls_back_to_directory_scan() {
        let dir = tempdir().unwrap();
        // Pre-index directory: snapshot files only.
        for n in [1u32, 2] {
            std::fs::write(dir.path().join(s(n).snapshot_filename()), b"{}").unwrap();
        }
        let store = FsSnapshotStore::open(dir.path().to_path_buf()).unwrap();
        let prev = store.previous_snapshot().unwrap().unwrap();
        assert_eq!(
            prev.file_name().unwrap().to_str().unwrap(),
            s(1).snapshot_filename()
        );
    }

    #[test]
    fn change_record_uses_stamp_and_extension() {
        let dir = tempdir().unwrap();
        let store = FsSnapshotStore::open(dir.path().to_path_buf()).unwrap();
        let path = store.write_change_record(&s(2), "diff", "-old\n+new\n").unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "changes_2026-01-02_00-00-00.diff"
        );
        assert_eq!(std::fs::read_to_string(path).unwrap(), "-old\n+new\n");
    }
}
