//! Sync command implementation.
//!
//! Runs the import pipeline end to end: load the task source, recover
//! the watermark from the checklist tail, render and append everything
//! above it. Summary counts go to stdout; per-task warnings have
//! already gone to stderr by the time this prints.

use std::path::PathBuf;

use crate::config::{resolve_checklist_path, resolve_source_path};
use crate::error::Result;
use crate::sync;

/// Execute the sync command.
///
/// # Errors
///
/// Returns an error when the source file is missing or malformed, or
/// when the checklist cannot be written.
pub fn execute(
    source: Option<&PathBuf>,
    checklist: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    let source_path = resolve_source_path(source.map(PathBuf::as_path));
    let checklist_path = resolve_checklist_path(checklist.map(PathBuf::as_path));

    let outcome = sync::sync(&source_path, &checklist_path)?;

    if json {
        let output = serde_json::json!({
            "imported": outcome.appended,
            "skipped": outcome.skipped,
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if outcome.selected == 0 {
        println!("No new tasks to import");
    } else {
        println!("Imported {} new tasks", outcome.appended);
        if outcome.skipped > 0 {
            println!("  (Skipped {} existing tasks)", outcome.skipped);
        }
    }

    Ok(())
}
