//! Task model for Taskmark.
//!
//! Tasks are read-only records sourced fresh from the task list on every
//! run; nothing in this crate ever mutates or writes one back.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static TASK_NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^task-(\d+)").unwrap()
});

/// Task status values.
///
/// Only `pending` and `completed` take part in synchronization. Every
/// other status string (`cancelled`, `blocked`, ...) folds into
/// [`TaskStatus::Other`] and is presumed intentionally absent from the
/// checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
    #[serde(other)]
    Other,
}

impl TaskStatus {
    /// Get the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Other => "other",
        }
    }

    /// Checklist checkbox for this status.
    #[must_use]
    pub const fn checkbox(&self) -> &'static str {
        match self {
            Self::Completed => "- [x]",
            Self::Pending | Self::Other => "- [ ]",
        }
    }

    /// Whether this status participates in synchronization.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        matches!(self, Self::Pending | Self::Completed)
    }
}

/// Priority values, a closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Get the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// A task record from the task source.
///
/// Field-level leniency matches the source contract: missing fields take
/// defaults here, and anything that must actually be well-formed (the
/// identifier, the priority, the tags) is checked at render time so a
/// bad record skips without aborting the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: Option<String>,

    /// Free text, treated as adversarial until sanitized.
    #[serde(default)]
    pub goal: String,

    #[serde(default)]
    pub status: TaskStatus,

    /// Raw priority string; closed-set membership is a render-time check.
    #[serde(default = "default_priority")]
    pub priority: String,

    /// Optional due date, ISO 8601 in, date-only out.
    #[serde(default)]
    pub due: Option<String>,

    /// Optional free tag appended to the hashtags.
    #[serde(default, rename = "type")]
    pub task_type: Option<String>,

    /// Completion timestamp; falls back to the sync date when absent.
    #[serde(default)]
    pub completed_at: Option<String>,
}

fn default_priority() -> String {
    "medium".to_string()
}

/// Numeric suffix of an identifier shaped `task-<digits>`.
///
/// Matches on the prefix only: `task-12abc` yields 12 here and is left
/// for full identifier validation to reject later. Anything without the
/// prefix yields `None`.
#[must_use]
pub fn task_number(id: &str) -> Option<u64> {
    TASK_NUMBER_PATTERN
        .captures(id)
        .and_then(|caps| caps[1].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_deserializes_known_and_other() {
        let pending: TaskStatus = serde_yaml::from_str("pending").unwrap();
        assert_eq!(pending, TaskStatus::Pending);
        let completed: TaskStatus = serde_yaml::from_str("completed").unwrap();
        assert_eq!(completed, TaskStatus::Completed);
        let cancelled: TaskStatus = serde_yaml::from_str("cancelled").unwrap();
        assert_eq!(cancelled, TaskStatus::Other);
        assert!(!cancelled.is_actionable());
    }

    #[test]
    fn test_checkbox_by_status() {
        assert_eq!(TaskStatus::Pending.checkbox(), "- [ ]");
        assert_eq!(TaskStatus::Completed.checkbox(), "- [x]");
    }

    #[test]
    fn test_task_from_yaml_with_defaults() {
        let task: Task = serde_yaml::from_str("id: task-3\ngoal: Fix it\nstatus: pending").unwrap();
        assert_eq!(task.id.as_deref(), Some("task-3"));
        assert_eq!(task.priority, "medium");
        assert!(task.due.is_none());
        assert!(task.task_type.is_none());
    }

    #[test]
    fn test_task_type_field_rename() {
        let task: Task =
            serde_yaml::from_str("id: task-9\ngoal: g\nstatus: pending\ntype: bugfix").unwrap();
        assert_eq!(task.task_type.as_deref(), Some("bugfix"));
    }

    #[test]
    fn test_task_number_prefix_semantics() {
        assert_eq!(task_number("task-12"), Some(12));
        assert_eq!(task_number("task-12abc"), Some(12));
        assert_eq!(task_number("task-007"), Some(7));
        assert_eq!(task_number("xtask-12"), None);
        assert_eq!(task_number("task-"), None);
        assert_eq!(task_number(""), None);
    }
}
