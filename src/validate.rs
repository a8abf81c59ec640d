//! Fail-fast input validation shared by every command surface.
//!
//! Everything here rejects bad input with an error; nothing degrades.
//! The one fail-soft path in the crate (goal text) lives in
//! [`crate::sanitize`] instead, and the two are never unified.
//!
//! Also home of [`safe_error_message`], the single choke point through
//! which errors reach users: absolute paths are redacted before display
//! so messages never leak the project or home directory layout.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use directories::BaseDirs;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::Priority;

/// Default byte ceiling for [`bound_input`].
pub const MAX_INPUT_BYTES: usize = 4096;

/// Default character ceiling for [`bound_input`].
pub const MAX_INPUT_CHARS: usize = 1000;

// ── Patterns ─────────────────────────────────────────────────

static TASK_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^task-\d+$").unwrap()
});

static HOME_PREFIX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(/Users|/home)/[^/\s]+").unwrap()
});

// ── Identifier and priority checks ───────────────────────────

/// Validate a task identifier: the literal prefix `task-` followed by
/// one or more ASCII digits, nothing else.
///
/// # Errors
///
/// Returns [`Error::Validation`] when the identifier does not match.
pub fn validate_task_id(id: &str) -> Result<()> {
    if TASK_ID_PATTERN.is_match(id) {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "Invalid task ID format: {id} (expected: task-N)"
        )))
    }
}

/// Validate a priority against the closed set.
///
/// Membership is exact: no case folding, no synonyms. `"High"` is as
/// invalid as `"urgent"`.
///
/// # Errors
///
/// Returns [`Error::Validation`] for anything outside
/// critical/high/medium/low.
pub fn validate_priority(input: &str) -> Result<Priority> {
    match input {
        "critical" => Ok(Priority::Critical),
        "high" => Ok(Priority::High),
        "medium" => Ok(Priority::Medium),
        "low" => Ok(Priority::Low),
        _ => Err(Error::Validation(format!(
            "Invalid priority: {input} (allowed: critical, high, medium, low)"
        ))),
    }
}

// ── Path containment ─────────────────────────────────────────

/// Validate that `path`, resolved against `base`, stays inside `base`.
///
/// Rejects any path containing `..` before resolution (substring check,
/// so `notes..md` is rejected too), then resolves symlinks and requires
/// the result to remain under the resolved base. Paths touching a
/// `.git` component are rejected outright.
///
/// # Errors
///
/// Returns [`Error::Validation`] for traversal, escape, unresolvable
/// paths, and `.git` access.
pub fn validate_path(path: &str, base: &Path) -> Result<PathBuf> {
    if path.contains("..") {
        return Err(Error::Validation("Path cannot contain ..".to_string()));
    }

    let base = base
        .canonicalize()
        .map_err(|_| Error::Validation("Path outside project".to_string()))?;
    let resolved = base
        .join(path)
        .canonicalize()
        .map_err(|_| Error::Validation(format!("Cannot resolve path: {path}")))?;

    if !resolved.starts_with(&base) {
        return Err(Error::Validation("Path outside project".to_string()));
    }

    if resolved.components().any(|c| c.as_os_str() == ".git") {
        return Err(Error::Validation(".git access denied".to_string()));
    }

    Ok(resolved)
}

// ── Generic input bound ──────────────────────────────────────

/// Normalize text to NFKC and enforce size ceilings.
///
/// Normalization happens first so the ceilings apply to what the rest
/// of the program will actually see: full-width and compatibility forms
/// are composed before a single byte is counted.
///
/// # Errors
///
/// Returns [`Error::Validation`] when the normalized text exceeds
/// `max_bytes` UTF-8 bytes or `max_chars` characters.
pub fn bound_input(text: &str, max_bytes: usize, max_chars: usize) -> Result<String> {
    let normalized: String = text.nfkc().collect();

    if normalized.len() > max_bytes {
        return Err(Error::Validation(format!("Input exceeds {max_bytes} byte limit")));
    }
    if normalized.chars().count() > max_chars {
        return Err(Error::Validation(format!("Input exceeds {max_chars} character limit")));
    }

    Ok(normalized)
}

// ── Error redaction ──────────────────────────────────────────

/// Replace filesystem detail in a message with placeholder tokens.
///
/// The current directory becomes `<project>`, any recognizable home
/// prefix becomes `<home>` (the process's own home first, then generic
/// `/Users/...` and `/home/...` prefixes).
#[must_use]
pub fn redact_paths(msg: &str) -> String {
    let mut msg = msg.to_string();

    if let Ok(cwd) = std::env::current_dir() {
        msg = msg.replace(&cwd.display().to_string(), "<project>");
    }
    if let Some(dirs) = BaseDirs::new() {
        msg = msg.replace(&dirs.home_dir().display().to_string(), "<home>");
    }
    HOME_PREFIX_PATTERN.replace_all(&msg, "<home>").into_owned()
}

/// Render an error for user display with filesystem details redacted.
///
/// Applies [`redact_paths`], keeps only the first line of the message,
/// and prefixes the context label. Every terminal error message passes
/// through here before reaching stderr.
#[must_use]
pub fn safe_error_message<E: fmt::Display>(error: &E, context: &str) -> String {
    let msg = redact_paths(&error.to_string());
    let first_line = msg.lines().next().unwrap_or_default();
    if context.is_empty() {
        format!("Error: {first_line}")
    } else {
        format!("Error in {context}: {first_line}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_task_id() {
        assert!(validate_task_id("task-1").is_ok());
        assert!(validate_task_id("task-042").is_ok());
        assert!(validate_task_id("task-").is_err());
        assert!(validate_task_id("task-1x").is_err());
        assert!(validate_task_id("Task-1").is_err());
        assert!(validate_task_id("xtask-1").is_err());
        assert!(validate_task_id("").is_err());
    }

    #[test]
    fn test_validate_priority_closed_set() {
        assert_eq!(validate_priority("critical").unwrap(), Priority::Critical);
        assert_eq!(validate_priority("low").unwrap(), Priority::Low);
        assert!(validate_priority("High").is_err());
        assert!(validate_priority("urgent").is_err());
        assert!(validate_priority("").is_err());
    }

    #[test]
    fn test_validate_path_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_path("../escape.md", dir.path()).is_err());
        assert!(validate_path("docs/../../escape.md", dir.path()).is_err());
        // Substring semantics: double dots anywhere are refused.
        assert!(validate_path("notes..md", dir.path()).is_err());
    }

    #[test]
    fn test_validate_path_rejects_git() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        std::fs::write(dir.path().join(".git/config"), "x").unwrap();
        assert!(validate_path(".git/config", dir.path()).is_err());
    }

    #[test]
    fn test_validate_path_accepts_contained() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("doc.md"), "# hi").unwrap();
        let resolved = validate_path("doc.md", dir.path()).unwrap();
        assert!(resolved.ends_with("doc.md"));
    }

    #[test]
    fn test_validate_path_rejects_symlink_escape() {
        let dir = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("secret.txt"), "s").unwrap();
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(outside.path().join("secret.txt"), dir.path().join("link.txt"))
                .unwrap();
            assert!(validate_path("link.txt", dir.path()).is_err());
        }
    }

    #[test]
    fn test_bound_input_normalizes_nfkc() {
        // Full-width "ＡＢ" composes to ASCII "AB".
        let out = bound_input("\u{FF21}\u{FF22}", 4096, 1000).unwrap();
        assert_eq!(out, "AB");
    }

    #[test]
    fn test_bound_input_enforces_ceilings() {
        let long = "x".repeat(1001);
        assert!(bound_input(&long, MAX_INPUT_BYTES, MAX_INPUT_CHARS).is_err());
        let ok = "x".repeat(1000);
        assert!(bound_input(&ok, MAX_INPUT_BYTES, MAX_INPUT_CHARS).is_ok());
        // Byte ceiling applies to the normalized UTF-8, not the char count.
        assert!(bound_input("héllo", 4, 1000).is_err());
        assert!(bound_input("hell", 4, 1000).is_ok());
    }

    #[test]
    fn test_safe_error_message_redacts_and_truncates() {
        let cwd = std::env::current_dir().unwrap();
        let raw = format!("open failed: {}/tasks.yml\nsecond line", cwd.display());
        let msg = safe_error_message(&raw, "loading tasks.yml");
        assert_eq!(msg, "Error in loading tasks.yml: open failed: <project>/tasks.yml");
    }

    #[test]
    fn test_safe_error_message_redacts_foreign_home() {
        let msg = safe_error_message(&"no such file: /home/alice/.ssh/id_rsa", "test");
        assert!(!msg.contains("alice"));
        assert!(msg.contains("<home>"));
    }

    #[test]
    fn test_safe_error_message_without_context() {
        let msg = safe_error_message(&"boom", "");
        assert_eq!(msg, "Error: boom");
    }
}
