//! Sync orchestration: load, watermark, filter, render, append, report.
//!
//! Idempotence lives in the selection step: only tasks whose numeric
//! suffix strictly exceeds the watermark are rendered, so re-running
//! with an unchanged source selects nothing and appends nothing. The
//! watermark comes from the checklist document itself, which also makes
//! an interrupted run safe — the next run recomputes it from whatever
//! actually reached the file.
//!
//! Failure is task-granular during rendering (skip and warn) and
//! batch-terminal everywhere else.

use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use crate::error::Result;
use crate::model::task_number;
use crate::sync::{file, render, source, watermark};
use crate::validate::safe_error_message;

/// Counts reported after a sync run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOutcome {
    /// Lines actually appended to the checklist document.
    pub appended: usize,
    /// Actionable tasks that were not appended this run, whether
    /// already synced or skipped during rendering.
    pub skipped: usize,
    /// Tasks that passed the watermark filter.
    pub selected: usize,
}

/// Run one full synchronization pass.
///
/// Renders every selected task in source order; a task that fails
/// validation is warned about and skipped without aborting the batch.
/// All surviving lines are appended in a single open-append-close
/// cycle.
///
/// # Errors
///
/// Returns an error for a missing or malformed task source and for I/O
/// failures on either file. Per-task rendering failures are never
/// errors here.
pub fn sync(source_path: &Path, checklist_path: &Path) -> Result<SyncOutcome> {
    let raw = source::load_source(source_path)?;
    let actionable = source::filter_actionable(raw);
    debug!(actionable = actionable.len(), "filtered actionable tasks");

    let watermark = watermark::scan(checklist_path)?;

    let selected: Vec<&Value> = actionable
        .iter()
        .filter(|record| {
            source::record_id(record)
                .and_then(task_number)
                .is_some_and(|n| n > watermark)
        })
        .collect();
    debug!(selected = selected.len(), watermark, "selected tasks past watermark");

    let sync_date = chrono::Local::now().format("%Y-%m-%d").to_string();
    let mut lines = Vec::new();
    for record in &selected {
        match render::render_line(record, &sync_date) {
            Ok(rendered) => {
                for warning in &rendered.warnings {
                    eprintln!("⚠️  Warning: {warning}");
                }
                lines.push(rendered.text);
            }
            Err(e) => {
                eprintln!(
                    "WARNING: Skipping invalid task: {}",
                    safe_error_message(&e, "task validation")
                );
            }
        }
    }

    file::append_lines(checklist_path, &lines)?;
    debug!(appended = lines.len(), "appended rendered lines");

    Ok(SyncOutcome {
        appended: lines.len(),
        skipped: actionable.len() - lines.len(),
        selected: selected.len(),
    })
}
