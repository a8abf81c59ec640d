//! Checklist line rendering.
//!
//! Turns one raw task record into one write-once checklist line:
//!
//! `<checkbox> <goal> | Priority: <p> [| Due: <date>] | Created: <date>
//! [| Completed: <date>] #task-N [#type]`
//!
//! Typing happens here, at the last possible moment, so that a record
//! that fails to deserialize costs exactly one skipped task. Everything
//! free-text passes through the sanitizer; everything identifier-like
//! passes through fail-fast validation.

use serde_yaml::Value;

use crate::error::{Error, Result};
use crate::model::Task;
use crate::sanitize::{sanitize_goal, sanitize_tags, SanitizeWarning};
use crate::validate::{validate_priority, validate_task_id};

/// A rendered checklist line plus the sanitizer's observations.
#[derive(Debug, Clone)]
pub struct RenderedLine {
    pub text: String,
    pub warnings: Vec<SanitizeWarning>,
}

/// Render one task record into a checklist line.
///
/// `sync_date` is the date the whole batch is stamped with; computing
/// it once per run keeps every line of a batch consistent.
///
/// # Errors
///
/// Returns [`Error::Validation`] for records that fail to deserialize,
/// identifiers that fail the exact format check, and priorities outside
/// the closed set; [`Error::TagFormat`] for bad tag tokens. All of
/// these are per-task failures the engine recovers from.
pub fn render_line(record: &Value, sync_date: &str) -> Result<RenderedLine> {
    let task: Task = serde_yaml::from_value(record.clone())
        .map_err(|e| Error::Validation(format!("Malformed task record: {e}")))?;

    let id = task.id.as_deref().unwrap_or_default();
    validate_task_id(id)?;

    let goal = sanitize_goal(&task.goal);
    let priority = validate_priority(&task.priority)?;

    let mut line = format!(
        "{} {} | Priority: {}",
        task.status.checkbox(),
        goal.text,
        priority.as_str()
    );

    if let Some(due) = task.due.as_deref().filter(|d| !d.is_empty()) {
        line.push_str(&format!(" | Due: {}", date_only(due)));
    }

    line.push_str(&format!(" | Created: {sync_date}"));

    if task.status == crate::model::TaskStatus::Completed {
        let completed = task
            .completed_at
            .as_deref()
            .filter(|c| !c.is_empty())
            .map_or(sync_date, date_only);
        line.push_str(&format!(" | Completed: {completed}"));
    }

    let mut tags = vec![id.to_string()];
    if let Some(task_type) = task.task_type.as_deref().filter(|t| !t.is_empty()) {
        tags.push(task_type.to_string());
    }
    let tags_str = sanitize_tags(&tags.join(" "))?;
    if !tags_str.is_empty() {
        let hashtags: Vec<String> = tags_str
            .split_whitespace()
            .map(|tag| format!("#{tag}"))
            .collect();
        line.push_str(&format!(" {}", hashtags.join(" ")));
    }

    Ok(RenderedLine {
        text: line,
        warnings: goal.warnings,
    })
}

/// Date part of an ISO 8601 timestamp (everything before the `T`).
fn date_only(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_render_pending_task() {
        let rec = record("{id: task-1, goal: Fix bug, status: pending, priority: high}");
        let line = render_line(&rec, "2025-06-01").unwrap();
        assert_eq!(
            line.text,
            "- [ ] Fix bug | Priority: high | Created: 2025-06-01 #task-1"
        );
        assert!(line.warnings.is_empty());
    }

    #[test]
    fn test_render_completed_task_with_timestamp() {
        let rec = record(
            "{id: task-2, goal: Ship it, status: completed, priority: low, \
             completed_at: \"2025-01-10T08:00:00Z\"}",
        );
        let line = render_line(&rec, "2025-06-01").unwrap();
        assert_eq!(
            line.text,
            "- [x] Ship it | Priority: low | Created: 2025-06-01 | Completed: 2025-01-10 #task-2"
        );
    }

    #[test]
    fn test_render_completed_task_falls_back_to_sync_date() {
        let rec = record("{id: task-3, goal: Done, status: completed, priority: medium}");
        let line = render_line(&rec, "2025-06-01").unwrap();
        assert!(line.text.contains("| Completed: 2025-06-01"));
    }

    #[test]
    fn test_render_due_date_truncates_time() {
        let rec = record(
            "{id: task-4, goal: g, status: pending, priority: medium, \
             due: \"2025-02-03T12:00:00Z\"}",
        );
        let line = render_line(&rec, "2025-06-01").unwrap();
        assert!(line.text.contains("| Due: 2025-02-03 |"));
    }

    #[test]
    fn test_render_type_becomes_second_hashtag() {
        let rec = record("{id: task-5, goal: g, status: pending, priority: medium, type: bugfix}");
        let line = render_line(&rec, "2025-06-01").unwrap();
        assert!(line.text.ends_with("#task-5 #bugfix"));
    }

    #[test]
    fn test_render_defaults_missing_priority_to_medium() {
        let rec = record("{id: task-6, goal: g, status: pending}");
        let line = render_line(&rec, "2025-06-01").unwrap();
        assert!(line.text.contains("| Priority: medium |"));
    }

    #[test]
    fn test_render_rejects_bad_identifier() {
        let rec = record("{id: task-7x, goal: g, status: pending, priority: medium}");
        assert!(render_line(&rec, "2025-06-01").is_err());
    }

    #[test]
    fn test_render_rejects_priority_outside_closed_set() {
        let rec = record("{id: task-8, goal: g, status: pending, priority: urgent}");
        let err = render_line(&rec, "2025-06-01").unwrap_err();
        assert!(err.to_string().contains("Invalid priority"));
    }

    #[test]
    fn test_render_rejects_bad_type_tag() {
        let rec = record("{id: task-9, goal: g, status: pending, priority: medium, type: \"no way\"}");
        // A type with a space splits into two tokens, both valid; an
        // illegal character is what trips the tag check.
        assert!(render_line(&rec, "2025-06-01").is_ok());

        let rec = record("{id: task-9, goal: g, status: pending, priority: medium, type: \"bad!\"}");
        assert!(render_line(&rec, "2025-06-01").is_err());
    }

    #[test]
    fn test_render_sanitizes_goal_and_reports_warnings() {
        let rec = record("{id: task-10, goal: \"evil; rm -rf | done\", status: pending, priority: medium}");
        let line = render_line(&rec, "2025-06-01").unwrap();
        assert!(line.text.contains("evil rm -rf done"));
        assert_eq!(line.warnings.len(), 2);
    }

    #[test]
    fn test_render_skips_malformed_record() {
        let rec = record("{id: task-11, goal: [not, text], status: pending}");
        let err = render_line(&rec, "2025-06-01").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
