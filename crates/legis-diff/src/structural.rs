use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::comparator::{ChangeReport, SnapshotComparator};

/// One changed field: dotted path into the snapshot, with the value on each
/// side. `None` marks a field that only exists on the other side.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct FieldChange {
    pub path: String,
    pub old: Option<Value>,
    pub new: Option<Value>,
}

/// Field-level comparator: parses both snapshots and reports added, removed
/// and changed paths as a JSON document.
#[derive(Clone, Debug, Default)]
pub struct StructuralComparator;

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn collect_changes(path: &str, old: &Value, new: &Value, out: &mut Vec<FieldChange>) {
    match (old, new) {
        (Value::Object(o), Value::Object(n)) => {
            for (key, old_val) in o {
                match n.get(key) {
                    Some(new_val) => collect_changes(&join_path(path, key), old_val, new_val, out),
                    None => out.push(FieldChange {
                        path: join_path(path, key),
                        old: Some(old_val.clone()),
                        new: None,
                    }),
                }
            }
            for (key, new_val) in n {
                if !o.contains_key(key) {
                    out.push(FieldChange {
                        path: join_path(path, key),
                        old: None,
                        new: Some(new_val.clone()),
                    });
                }
            }
        }
        (Value::Array(o), Value::Array(n)) => {
            let len = o.len().max(n.len());
            for i in 0..len {
                let p = format!("{}[{}]", path, i);
                match (o.get(i), n.get(i)) {
                    (Some(a), Some(b)) => collect_changes(&p, a, b, out),
                    (Some(a), None) => out.push(FieldChange {
                        path: p,
                        old: Some(a.clone()),
                        new: None,
                    }),
                    (None, Some(b)) => out.push(FieldChange {
                        path: p,
                        old: None,
                        new: Some(b.clone()),
                    }),
                    (None, None) => unreachable!(),
                }
            }
        }
        (o, n) => {
            if o != n {
                out.push(FieldChange {
                    path: path.to_string(),
                    old: Some(o.clone()),
                    new: Some(n.clone()),
                });
            }
        }
    }
}

impl SnapshotComparator for StructuralComparator {
    fn compare(&self, old: &Path, new: &Path) -> Result<Option<ChangeReport>> {
        let old_val: Value = serde_json::from_slice(
            &std::fs::read(old).with_context(|| format!("read {}", old.display()))?,
        )
        .with_context(|| format!("parse {}", old.display()))?;
        let new_val: Value = serde_json::from_slice(
            &std::fs::read(new).with_context(|| format!("read {}", new.display()))?,
        )
        .with_context(|| format!("parse {}", new.display()))?;

        let mut changes = Vec::new();
        collect_changes("", &old_val, &new_val, &mut changes);
        if changes.is_empty() {
            return Ok(None);
        }
        Ok(Some(ChangeReport {
            body: serde_json::to_string_pretty(&changes)?,
            extension: "json",
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, value: &Value) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
        path
    }

    #[test]
    fn equal_values_produce_no_report() {
        let dir = tempdir().unwrap();
        let v = json!({"Measures": {"value": [1, 2]}});
        let a = write(dir.path(), "a.json", &v);
        let b = write(dir.path(), "b.json", &v);
        assert!(StructuralComparator.compare(&a, &b).unwrap().is_none());
    }

    #[test]
    fn changed_field_is_reported_with_dotted_path() {
        let mut out = Vec::new();
        collect_changes(
            "",
            &json!({"Measures": {"count": 1}}),
            &json!({"Measures": {"count": 2}}),
            &mut out,
        );
        assert_eq!(
            out,
            vec![FieldChange {
                path: "Measures.count".into(),
                old: Some(json!(1)),
                new: Some(json!(2)),
            }]
        );
    }

    #[test]
    fn added_and_removed_keys_are_one_sided() {
        let mut out = Vec::new();
        collect_changes("", &json!({"a": 1}), &json!({"b": 2}), &mut out);
        assert_eq!(out.len(), 2);
        assert!(out.contains(&FieldChange {
            path: "a".into(),
            old: Some(json!(1)),
            new: None,
        }));
        assert!(out.contains(&FieldChange {
            path: "b".into(),
            old: None,
            new: Some(json!(2)),
        }));
    }

    #[test]
    fn array_growth_is_reported_by_index() {
        let mut out = Vec::new();
        collect_changes("", &json!({"v": [1]}), &json!({"v": [1, 2]}), &mut out);
        assert_eq!(
            out,
            vec![FieldChange {
                path: "v[1]".into(),
                old: None,
                new: Some(json!(2)),
            }]
        );
    }

    #[test]
    fn report_body_is_json() {
        let dir = tempdir().unwrap();
        let a = write(dir.path(), "a.json", &json!({"x": 1}));
        let b = write(dir.path(), "b.json", &json!({"x": 2}));
        let report = StructuralComparator.compare(&a, &b).unwrap().unwrap();
        assert_eq!(report.extension, "json");
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&report.body).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0]["path"], "x");
    }
}
