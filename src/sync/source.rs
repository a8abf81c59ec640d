//! Task source loading and structural validation.
//!
//! The source document is parsed into raw YAML values here, not typed
//! records: per-record problems must surface as per-task skips during
//! rendering, never as a batch abort, so typing is deferred to the
//! render boundary. Only the two structural requirements — a mapping at
//! the top level, a sequence under `tasks` — are hard failures.

use std::io;
use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use crate::error::{Error, Result};

/// Load the task source and return its raw task records.
///
/// A missing `tasks` key is an empty list, not an error.
///
/// # Errors
///
/// Returns [`Error::SourceNotFound`] when the file is absent — the one
/// error the CLI renders as "no tasks file" rather than a generic
/// failure — and [`Error::SourceFormat`] when the top level is not a
/// mapping or `tasks` is not a sequence. Unparseable YAML surfaces as
/// [`Error::Yaml`].
pub fn load_source(path: &Path) -> Result<Vec<Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::SourceNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let data: Value = serde_yaml::from_str(&content)?;
    let Value::Mapping(mut mapping) = data else {
        return Err(Error::SourceFormat("must be a mapping".to_string()));
    };

    match mapping.remove("tasks") {
        None => Ok(Vec::new()),
        Some(Value::Sequence(tasks)) => {
            debug!(total = tasks.len(), "loaded task source");
            Ok(tasks)
        }
        Some(_) => Err(Error::SourceFormat("tasks must be a sequence".to_string())),
    }
}

/// Keep only mapping records whose status is actionable.
///
/// Anything that is not a mapping, and any status outside
/// pending/completed, drops out silently: such records are presumed
/// intentionally absent from the checklist.
#[must_use]
pub fn filter_actionable(tasks: Vec<Value>) -> Vec<Value> {
    tasks
        .into_iter()
        .filter(|record| {
            record.is_mapping()
                && matches!(
                    record.get("status").and_then(Value::as_str),
                    Some("pending" | "completed")
                )
        })
        .collect()
}

/// The raw `id` field of a record, when present and a string.
#[must_use]
pub fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_source(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("tasks.yml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_missing_file_is_source_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load_source(&dir.path().join("tasks.yml")).unwrap_err();
        assert!(matches!(err, Error::SourceNotFound { .. }));
    }

    #[test]
    fn test_load_rejects_non_mapping_top_level() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "- just\n- a\n- list\n");
        let err = load_source(&path).unwrap_err();
        assert!(err.to_string().contains("must be a mapping"));
    }

    #[test]
    fn test_load_empty_document_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "");
        assert!(load_source(&path).is_err());
    }

    #[test]
    fn test_load_missing_tasks_key_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "project: demo\n");
        assert_eq!(load_source(&path).unwrap(), Vec::<Value>::new());
    }

    #[test]
    fn test_load_rejects_non_sequence_tasks() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "tasks: not-a-list\n");
        let err = load_source(&path).unwrap_err();
        assert!(err.to_string().contains("tasks must be a sequence"));
    }

    #[test]
    fn test_filter_keeps_pending_and_completed_mappings() {
        let tasks: Vec<Value> = serde_yaml::from_str(
            "- {id: task-1, status: pending}\n\
             - {id: task-2, status: completed}\n\
             - {id: task-3, status: cancelled}\n\
             - {id: task-4}\n\
             - plain-string\n",
        )
        .unwrap();

        let kept = filter_actionable(tasks);
        assert_eq!(kept.len(), 2);
        assert_eq!(record_id(&kept[0]), Some("task-1"));
        assert_eq!(record_id(&kept[1]), Some("task-2"));
    }

    #[test]
    fn test_record_id_requires_string() {
        let record: Value = serde_yaml::from_str("{id: 42, status: pending}").unwrap();
        assert_eq!(record_id(&record), None);
    }
}
