//! Auto-fixers for task source files.
//!
//! Task files written by generators or pasted out of chat transcripts
//! arrive with a recurring set of cosmetic defects: the YAML wrapped in
//! markdown code fences, legacy field names (`sprint_id:`, `task_id:`),
//! and enum values in whatever casing the author felt like. Each fix is
//! a pure line-oriented text rewrite; nothing here parses YAML, so a
//! file too broken to parse can still be repaired into one that isn't.
//!
//! Enum normalization folds values into the vocabulary the rest of the
//! pipeline accepts: lowercase statuses (`pending`, `completed`,
//! `in_progress`, `blocked`, `cancelled`) and priorities (`critical`,
//! `high`, `medium`, `low`), with out-of-vocabulary aliases mapped to
//! their nearest member (`done` to `completed`, `todo` to `pending`,
//! `urgent` to `critical`). Unrecognized values are left alone for the
//! validators to report.

use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::Result;

// ── patterns ──

static FENCE_OPEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^```ya?ml\s*\n").unwrap());
static FENCE_CLOSE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)\n```\s*$").unwrap());
static FENCE_LINE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^```\s*$").unwrap());
static FENCE_STANDALONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*```\s*\n").unwrap());

static SPRINT_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(\s*)sprint_id:").unwrap());
static TASK_ID_FIELD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(\s*)task_id:").unwrap());

static STATUS_LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^(\s*status:\s*["']?)([^"'\n]*?)(["']?\s*)$"#).unwrap()
});
static PRIORITY_LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^(\s*priority:\s*["']?)([^"'\n]*?)(["']?\s*)$"#).unwrap()
});

static BLANK_RUN_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\n\n+").unwrap());

// ── fixes ──

/// Remove markdown code fence markers, leaving their YAML payload.
fn strip_code_fences(content: &str) -> String {
    let content = FENCE_OPEN_PATTERN.replace_all(content, "");
    let content = FENCE_CLOSE_PATTERN.replace_all(&content, "");
    let content = FENCE_LINE_PATTERN.replace_all(&content, "");
    FENCE_STANDALONE_PATTERN.replace_all(&content, "").into_owned()
}

/// Rewrite legacy identifier fields to `id:`, indentation preserved.
fn rename_id_fields(content: &str) -> String {
    let content = SPRINT_ID_PATTERN.replace_all(content, "${1}id:");
    TASK_ID_FIELD_PATTERN
        .replace_all(&content, "${1}id:")
        .into_owned()
}

fn canonical_status(value: &str) -> Option<&'static str> {
    match value.trim().to_lowercase().as_str() {
        "done" | "completed" => Some("completed"),
        "pending" | "todo" | "to do" => Some("pending"),
        "in progress" | "in_progress" | "inprogress" => Some("in_progress"),
        "blocked" => Some("blocked"),
        "cancelled" | "canceled" => Some("cancelled"),
        _ => None,
    }
}

fn canonical_priority(value: &str) -> Option<&'static str> {
    match value.trim().to_lowercase().as_str() {
        "critical" | "urgent" => Some("critical"),
        "high" => Some("high"),
        "medium" => Some("medium"),
        "low" => Some("low"),
        _ => None,
    }
}

fn normalize_field(
    content: &str,
    pattern: &Regex,
    canonical: fn(&str) -> Option<&'static str>,
) -> String {
    pattern
        .replace_all(content, |caps: &Captures| match canonical(&caps[2]) {
            Some(value) => format!("{}{value}{}", &caps[1], &caps[3]),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Fold `status:` and `priority:` values into the canonical lowercase
/// vocabulary. Quoting style and indentation survive the rewrite.
fn normalize_enum_values(content: &str) -> String {
    let content = normalize_field(content, &STATUS_LINE_PATTERN, canonical_status);
    normalize_field(&content, &PRIORITY_LINE_PATTERN, canonical_priority)
}

fn collapse_blank_runs(content: &str) -> String {
    BLANK_RUN_PATTERN.replace_all(content, "\n\n").into_owned()
}

/// Apply every fix in sequence and return the repaired text.
///
/// Fence stripping runs first so the other fixes see bare YAML lines;
/// blank-line collapsing runs last to absorb the holes stripping leaves
/// behind. The whole pipeline is idempotent.
#[must_use]
pub fn apply_fixes(content: &str) -> String {
    let content = strip_code_fences(content);
    let content = rename_id_fields(&content);
    let content = normalize_enum_values(&content);
    collapse_blank_runs(&content)
}

/// Fix a file in place.
///
/// Returns `true` when the file was rewritten, `false` when it was
/// already clean. The file is only touched when something changed.
///
/// # Errors
///
/// Returns an error when the file cannot be read or written.
pub fn fix_file(path: &Path) -> Result<bool> {
    let original = std::fs::read_to_string(path)?;
    let fixed = apply_fixes(&original);

    if fixed == original {
        tracing::debug!(path = %path.display(), "no fixes needed");
        return Ok(false);
    }

    std::fs::write(path, &fixed)?;
    tracing::debug!(path = %path.display(), "fixes applied");
    Ok(true)
}

// ── tests ──
