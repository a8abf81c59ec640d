//! Adversarial-text defusal for goal strings and tag tokens.
//!
//! Two deliberately different strategies live here:
//!
//! - [`sanitize_goal`] is fail-soft: goal text comes from a semi-trusted
//!   source and a single bad goal must not halt a sync batch, so the text
//!   is degraded (stripped, collapsed, truncated) and warnings are
//!   collected instead of errors.
//! - [`sanitize_tags`] is fail-fast: tags end up as identifiers in the
//!   checklist document, so a bad token rejects the whole tag string.
//!
//! The goal pipeline's step order is load-bearing: a character removed
//! by the metacharacter step can reveal a pattern an earlier step
//! already checked for. Do not reorder the steps.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Character budget for a goal after sanitization. Output may carry up
/// to three more characters for the ellipsis marker.
pub const MAX_GOAL_CHARS: usize = 200;

/// Per-token character budget for tags.
pub const MAX_TAG_CHARS: usize = 32;

/// Shell metacharacters removed from goal text, in warning order.
const SHELL_METACHARACTERS: [char; 7] = [';', '|', '&', '$', '`', '<', '>'];

static CHECKBOX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"- \[[x ]\]").unwrap()
});

static TASK_HASHTAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#task-\d+").unwrap()
});

static WHITESPACE_RUN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").unwrap()
});

static TAG_TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap()
});

// ── Goal sanitizer (fail-soft) ───────────────────────────────

/// A non-fatal observation made while degrading goal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizeWarning {
    /// A shell metacharacter was present and removed.
    DangerousCharacter(char),
    /// The goal exceeded [`MAX_GOAL_CHARS`] and was cut.
    Truncated,
}

impl fmt::Display for SanitizeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DangerousCharacter(c) => {
                write!(f, "Task goal contains potentially dangerous character: {c}")
            }
            Self::Truncated => {
                write!(f, "Task goal truncated to {MAX_GOAL_CHARS} characters")
            }
        }
    }
}

/// The degraded goal text plus everything worth telling the user about.
#[derive(Debug, Clone, Default)]
pub struct GoalOutcome {
    pub text: String,
    pub warnings: Vec<SanitizeWarning>,
}

/// Degrade goal text until it is safe to embed in a checklist line.
///
/// Steps, in order: newlines and carriage returns become spaces;
/// checkbox substrings (`- [ ]`, `- [x]`) are stripped; task-identifier
/// hashtags are stripped; each shell metacharacter present is removed
/// with one warning per distinct character; whitespace runs collapse to
/// a single space; text over [`MAX_GOAL_CHARS`] characters is truncated
/// with an ellipsis marker; leading and trailing whitespace is trimmed.
///
/// Never fails. The output is a single line of at most
/// `MAX_GOAL_CHARS + 3` characters, and sanitizing it again yields the
/// identical string.
#[must_use]
pub fn sanitize_goal(goal: &str) -> GoalOutcome {
    if goal.is_empty() {
        return GoalOutcome::default();
    }

    let mut warnings = Vec::new();
    let mut text = goal.replace('\n', " ").replace('\r', " ");

    text = CHECKBOX_PATTERN.replace_all(&text, "").into_owned();
    text = TASK_HASHTAG_PATTERN.replace_all(&text, "").into_owned();

    for c in SHELL_METACHARACTERS {
        if text.contains(c) {
            warnings.push(SanitizeWarning::DangerousCharacter(c));
            text.retain(|existing| existing != c);
        }
    }

    text = WHITESPACE_RUN_PATTERN.replace_all(&text, " ").into_owned();

    if text.chars().count() > MAX_GOAL_CHARS {
        text = text.chars().take(MAX_GOAL_CHARS).collect();
        text.push_str("...");
        warnings.push(SanitizeWarning::Truncated);
    }

    GoalOutcome {
        text: text.trim().to_string(),
        warnings,
    }
}

// ── Tag sanitizer (fail-fast) ────────────────────────────────

/// Validate a space-separated tag string, token by token.
///
/// Every token must be alphanumeric-with-underscore-and-hyphen and at
/// most [`MAX_TAG_CHARS`] characters. The input is returned unchanged
/// on success; tags are identifiers, so nothing is ever degraded here.
///
/// # Errors
///
/// Returns [`Error::TagFormat`] naming the first offending token.
pub fn sanitize_tags(tags: &str) -> Result<String> {
    if tags.is_empty() {
        return Ok(String::new());
    }

    for token in tags.split_whitespace() {
        if !TAG_TOKEN_PATTERN.is_match(token) {
            return Err(Error::TagFormat {
                token: token.to_string(),
                reason: "allowed: alphanumeric, underscore, hyphen only".to_string(),
            });
        }
        if token.len() > MAX_TAG_CHARS {
            return Err(Error::TagFormat {
                token: token.to_string(),
                reason: format!("max: {MAX_TAG_CHARS} characters, got: {}", token.len()),
            });
        }
    }

    Ok(tags.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_newlines_become_spaces() {
        let out = sanitize_goal("fix\nthe\r\nbug");
        assert_eq!(out.text, "fix the bug");
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_goal_strips_checkboxes_and_hashtags() {
        let out = sanitize_goal("evil - [x] fake done #task-99 entry");
        assert_eq!(out.text, "evil fake done entry");
    }

    #[test]
    fn test_goal_removes_metacharacters_with_one_warning_each() {
        let out = sanitize_goal("run; rm | cat & echo $HOME `id` a<b>c");
        for c in SHELL_METACHARACTERS {
            assert!(!out.text.contains(c), "{c} survived");
        }
        let warned: Vec<char> = out
            .warnings
            .iter()
            .filter_map(|w| match w {
                SanitizeWarning::DangerousCharacter(c) => Some(*c),
                SanitizeWarning::Truncated => None,
            })
            .collect();
        assert_eq!(warned, SHELL_METACHARACTERS.to_vec());
    }

    #[test]
    fn test_goal_warns_once_for_repeated_character() {
        let out = sanitize_goal("a;b;c;d");
        assert_eq!(out.warnings, vec![SanitizeWarning::DangerousCharacter(';')]);
        assert_eq!(out.text, "abcd");
    }

    #[test]
    fn test_goal_truncates_with_ellipsis() {
        let long = "x".repeat(250);
        let out = sanitize_goal(&long);
        assert_eq!(out.text.chars().count(), MAX_GOAL_CHARS + 3);
        assert!(out.text.ends_with("..."));
        assert!(out.warnings.contains(&SanitizeWarning::Truncated));
    }

    #[test]
    fn test_goal_length_bound_holds_for_multibyte() {
        let long = "é".repeat(500);
        let out = sanitize_goal(&long);
        assert!(out.text.chars().count() <= MAX_GOAL_CHARS + 3);
    }

    #[test]
    fn test_goal_sanitize_is_idempotent() {
        let long = "y".repeat(400);
        let inputs = [
            "plain goal",
            "fix\nthe bug; now | really",
            long.as_str(),
            "  spaced   out\t\tgoal  ",
        ];
        for input in inputs {
            let once = sanitize_goal(input);
            let twice = sanitize_goal(&once.text);
            assert_eq!(once.text, twice.text, "not stable for {input:?}");
        }
    }

    #[test]
    fn test_goal_step_order_newline_collapse_feeds_checkbox_strip() {
        // The newline step runs before checkbox stripping, so a checkbox
        // assembled across a line break is still caught.
        let out = sanitize_goal("-\n[x] sneak");
        assert_eq!(out.text, "sneak");
    }

    #[test]
    fn test_goal_step_order_metacharacter_removal_runs_last_of_strips() {
        // Checkbox stripping happens before metacharacter removal, so a
        // checkbox only revealed by removing a metacharacter survives.
        // The order is part of the contract.
        let out = sanitize_goal("- [|x] kept");
        assert_eq!(out.text, "- [x] kept");
    }

    #[test]
    fn test_goal_empty_input() {
        let out = sanitize_goal("");
        assert_eq!(out.text, "");
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_tags_pass_through_valid() {
        assert_eq!(sanitize_tags("task-1 security api_v2").unwrap(), "task-1 security api_v2");
        assert_eq!(sanitize_tags("").unwrap(), "");
    }

    #[test]
    fn test_tags_reject_bad_character() {
        let err = sanitize_tags("good bad!tag").unwrap_err();
        assert!(err.to_string().contains("bad!tag"));
    }

    #[test]
    fn test_tags_length_boundary() {
        let ok = "a".repeat(32);
        assert!(sanitize_tags(&ok).is_ok());
        let too_long = "a".repeat(33);
        let err = sanitize_tags(&too_long).unwrap_err();
        assert!(err.to_string().contains("33"));
    }
}
