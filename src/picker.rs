//! Next-task picking from the checklist document.
//!
//! A read-only scan: the first unchecked entry wins, in document order.
//! Entries carrying a task-identifier hashtag came from the task source
//! and get structured output; anything else was hand-written and is
//! treated as a lightweight task.

use std::io;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};

static TRACKED_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#(task-\d+)").unwrap()
});

static PRIORITY_FIELD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Priority:\s*(\w+)").unwrap()
});

static EFFORT_FIELD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Effort:\s*([^|]+)").unwrap()
});

/// The first unchecked entry of the checklist, parsed.
#[derive(Debug, Clone, Serialize)]
pub struct NextTask {
    /// Task identifier when the entry carries a `#task-N` hashtag.
    pub task_id: Option<String>,
    /// Parsed `Priority:` field, or `unknown`.
    pub priority: String,
    /// Parsed `Effort:` field, or `unknown`.
    pub effort: String,
    /// The full trimmed checklist line.
    pub description: String,
}

impl NextTask {
    /// Whether this entry is tracked in the task source.
    #[must_use]
    pub const fn is_tracked(&self) -> bool {
        self.task_id.is_some()
    }
}

/// Find the first unchecked entry in the checklist document.
///
/// Returns `Ok(None)` when every entry is checked off.
///
/// # Errors
///
/// Returns [`Error::ChecklistNotFound`] when the document is absent,
/// or an I/O error if it cannot be read.
pub fn find_next(checklist: &Path) -> Result<Option<NextTask>> {
    let content = match std::fs::read_to_string(checklist) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::ChecklistNotFound {
                path: checklist.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    Ok(content
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with("- [ ]"))
        .map(parse_task_line))
}

/// Parse one checklist line into its task fields.
#[must_use]
pub fn parse_task_line(line: &str) -> NextTask {
    let task_id = TRACKED_ID_PATTERN
        .captures(line)
        .map(|caps| caps[1].to_string());

    let priority = PRIORITY_FIELD_PATTERN
        .captures(line)
        .map_or_else(|| "unknown".to_string(), |caps| caps[1].to_string());

    let effort = EFFORT_FIELD_PATTERN
        .captures(line)
        .map_or_else(|| "unknown".to_string(), |caps| caps[1].trim().to_string());

    NextTask {
        task_id,
        priority,
        effort,
        description: line.to_string(),
    }
}
