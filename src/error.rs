//! Error types for the Taskmark CLI.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Stable exit codes (1 for terminal failures, 2 for report input errors)
//! - Retryability flags for agent self-correction
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers
//!
//! Fail-fast validation failures surface here. The goal sanitizer is the
//! one deliberately fail-soft path in the crate and never constructs an
//! `Error`; see [`crate::sanitize`].

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for Taskmark operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes.
///
/// Each code maps to a SCREAMING_SNAKE string and an exit code. Agents
/// match on the string; shell scripts on the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Source file (tasks.yml)
    SourceNotFound,
    SourceFormat,

    // Checklist document (todo.md)
    ChecklistNotFound,

    // Validation
    Validation,
    TagFormat,

    // Lookups
    TaskNotFound,

    // Agent metadata
    MissingFrontmatter,
    InvalidMetadata,

    // Validation reports
    Report,

    // I/O and serialization
    IoError,
    YamlError,
    JsonError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::SourceNotFound => "SOURCE_NOT_FOUND",
            Self::SourceFormat => "SOURCE_FORMAT",
            Self::ChecklistNotFound => "CHECKLIST_NOT_FOUND",
            Self::Validation => "VALIDATION",
            Self::TagFormat => "TAG_FORMAT",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::MissingFrontmatter => "MISSING_FRONTMATTER",
            Self::InvalidMetadata => "INVALID_METADATA",
            Self::Report => "REPORT",
            Self::IoError => "IO_ERROR",
            Self::YamlError => "YAML_ERROR",
            Self::JsonError => "JSON_ERROR",
        }
    }

    /// Process exit code for this error.
    ///
    /// Every terminal failure exits 1, with one exception: report input
    /// errors exit 2 so scripts can tell "gates failed" (1) apart from
    /// "the report itself was unreadable" (2).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Report => 2,
            _ => 1,
        }
    }

    /// Whether an agent should retry with corrected input.
    ///
    /// True for malformed-input errors the caller can fix (bad tags,
    /// bad metadata, bad source shape). False for not-found and I/O.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::SourceFormat | Self::Validation | Self::TagFormat | Self::InvalidMetadata
        )
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// File-name label for not-found messages: the final path component,
/// or the whole path when there is none.
fn file_label(path: &Path) -> Cow<'_, str> {
    path.file_name()
        .unwrap_or_else(|| path.as_os_str())
        .to_string_lossy()
}

/// Errors that can occur in Taskmark CLI operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{} not found in current directory", file_label(path))]
    SourceNotFound { path: PathBuf },

    #[error("Invalid tasks.yml: {0}")]
    SourceFormat(String),

    #[error("{} not found", file_label(path))]
    ChecklistNotFound { path: PathBuf },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid tag '{token}': {reason}")]
    TagFormat { token: String, reason: String },

    #[error("Task not found: {id}")]
    TaskNotFound { id: String },

    #[error("No frontmatter found in {}", path.display())]
    MissingFrontmatter { path: PathBuf },

    #[error("Invalid agent metadata: {0}")]
    InvalidMetadata(String),

    #[error("{0}")]
    Report(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::SourceNotFound { .. } => ErrorCode::SourceNotFound,
            Self::SourceFormat(_) => ErrorCode::SourceFormat,
            Self::ChecklistNotFound { .. } => ErrorCode::ChecklistNotFound,
            Self::Validation(_) => ErrorCode::Validation,
            Self::TagFormat { .. } => ErrorCode::TagFormat,
            Self::TaskNotFound { .. } => ErrorCode::TaskNotFound,
            Self::MissingFrontmatter { .. } => ErrorCode::MissingFrontmatter,
            Self::InvalidMetadata(_) => ErrorCode::InvalidMetadata,
            Self::Report(_) => ErrorCode::Report,
            Self::Io(_) => ErrorCode::IoError,
            Self::Yaml(_) => ErrorCode::YamlError,
            Self::Json(_) => ErrorCode::JsonError,
        }
    }

    /// Exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint for agents and humans.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::SourceNotFound { path } => {
                Some(format!("Create {} or run from project root", file_label(path)))
            }

            Self::ChecklistNotFound { .. } => {
                Some("Run `taskmark sync` to import tasks first".to_string())
            }

            Self::TaskNotFound { id } => Some(format!(
                "No task with ID '{id}' in tasks.yml. Check the id field of your task entries."
            )),

            Self::MissingFrontmatter { .. } => Some(
                "Agent files start with a `---` delimited YAML block before the body".to_string(),
            ),

            Self::TagFormat { .. } => Some(
                "Tags are alphanumeric with - and _, at most 32 characters each".to_string(),
            ),

            Self::Validation(msg) => {
                if msg.contains("priority") {
                    Some("Valid priorities: critical, high, medium, low".to_string())
                } else if msg.contains("task ID") || msg.contains("task id") {
                    Some("Task IDs look like task-42: the literal prefix and digits".to_string())
                } else {
                    None
                }
            }

            Self::SourceFormat(_)
            | Self::InvalidMetadata(_)
            | Self::Report(_)
            | Self::Io(_)
            | Self::Yaml(_)
            | Self::Json(_) => None,
        }
    }

    /// The display message with filesystem paths redacted, first line only.
    ///
    /// Anything that leaves the process as machine-readable output uses
    /// this instead of `to_string()`.
    #[must_use]
    pub fn redacted_message(&self) -> String {
        let msg = crate::validate::redact_paths(&self.to_string());
        msg.lines().next().unwrap_or_default().to_string()
    }

    /// Structured JSON representation for machine consumption.
    ///
    /// Includes error code, message, retryability, exit code, and
    /// optional recovery hint. Agents parse this instead of stderr text.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.redacted_message(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages_name_the_resolved_file() {
        let err = Error::SourceNotFound {
            path: PathBuf::from("backlog.yml"),
        };
        assert_eq!(err.to_string(), "backlog.yml not found in current directory");
        assert_eq!(
            err.hint().unwrap(),
            "Create backlog.yml or run from project root"
        );

        let err = Error::ChecklistNotFound {
            path: PathBuf::from("work/sprint.md"),
        };
        assert_eq!(err.to_string(), "sprint.md not found");
    }

    #[test]
    fn test_not_found_messages_keep_conventional_defaults() {
        let err = Error::SourceNotFound {
            path: PathBuf::from("tasks.yml"),
        };
        assert_eq!(err.to_string(), "tasks.yml not found in current directory");

        let err = Error::ChecklistNotFound {
            path: PathBuf::from("todo.md"),
        };
        assert_eq!(err.to_string(), "todo.md not found");
    }
}
