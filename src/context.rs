//! Task context assembly for agent consumption.
//!
//! Resolves a task's documentation references into inline content so an
//! agent can pick up a task without chasing files itself. A reference is
//! either a whole file (`docs/api.md`) or a single section of one
//! (`docs/api.md#Authentication`), and every resolved reference lands in
//! the output as a `{reference, content}` pair.
//!
//! Architecture: resolution is fail-soft per document. A reference that
//! cannot be resolved (missing file, unknown section, path outside the
//! project) embeds an `ERROR:` string as its content instead of failing
//! the whole lookup, so one stale link never hides the rest of the
//! context. Only a missing or unreadable source file, or an unknown task
//! ID, is a hard error.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;
use serde_yaml::Value;

use crate::error::{Error, Result};
use crate::sync::{load_source, record_id};
use crate::validate::{bound_input, validate_path, MAX_INPUT_BYTES, MAX_INPUT_CHARS};

// ── reference resolution ──

/// Load the full context for one task: the raw task record plus the
/// resolved content of each of its `docs` references.
///
/// The record is passed through as-is so fields the sync pipeline does
/// not model (effort estimates, custom metadata) survive into the
/// output.
///
/// # Errors
///
/// Returns an error when the source file is missing or malformed, or
/// when no task with the given ID exists. Unresolvable document
/// references are not errors; they embed `ERROR:` strings instead.
pub fn load_task_context(
    task_id: &str,
    source_path: &Path,
    root: &Path,
) -> Result<serde_json::Value> {
    let records = load_source(source_path)?;
    let task = records
        .iter()
        .find(|record| record_id(record) == Some(task_id))
        .ok_or_else(|| Error::TaskNotFound {
            id: task_id.to_string(),
        })?;

    let mut documents = Vec::new();
    if let Some(Value::Sequence(refs)) = task.get("docs") {
        for doc_ref in refs {
            let Some(reference) = doc_ref.as_str() else {
                tracing::debug!("skipping non-string docs entry");
                continue;
            };
            documents.push(json!({
                "reference": reference,
                "content": resolve_reference(reference, root),
            }));
        }
    }

    Ok(json!({
        "task": serde_json::to_value(task)?,
        "documents": documents,
    }))
}

/// Resolve one reference to its content, or an `ERROR:` string.
fn resolve_reference(reference: &str, root: &Path) -> String {
    let (file_part, section) = match reference.split_once('#') {
        Some((file, section)) => (file.trim(), Some(section.trim())),
        None => (reference.trim(), None),
    };

    let path = match validate_path(file_part, root) {
        Ok(path) => path,
        Err(e) => return format!("ERROR: {}", e.redacted_message()),
    };
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return format!("ERROR: File not found: {file_part}"),
    };

    match section {
        None => content,
        Some(section) => {
            let section = match bound_input(section, MAX_INPUT_BYTES, MAX_INPUT_CHARS) {
                Ok(section) => section,
                Err(e) => return format!("ERROR: {}", e.redacted_message()),
            };
            extract_section(&content, &section).unwrap_or_else(|| {
                format!("ERROR: Section '{section}' not found in {file_part}")
            })
        }
    }
}

// ── section extraction ──

static NEXT_HEADER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n##+ ").unwrap());

/// Extract a markdown section by header name, header line included.
///
/// Matches any `##`-or-deeper header whose text starts with `section`
/// and runs until the next header of depth two or more. Subsections
/// count as boundaries, so only the section's own lead text comes back.
fn extract_section(content: &str, section: &str) -> Option<String> {
    let header = Regex::new(&format!(r"##+ {}", regex::escape(section))).ok()?;
    let start = header.find(content)?.start();
    let body = &content[start..];
    let end = NEXT_HEADER_PATTERN
        .find(body)
        .map_or(body.len(), |m| m.start());
    Some(body[..end].trim().to_string())
}

// ── tests ──
