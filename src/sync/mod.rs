//! Task-source to checklist synchronization.
//!
//! This module mirrors newly-created task records into the checklist
//! document, exactly once each:
//!
//! - **Source**: load and structurally validate the task list
//! - **Watermark**: recover the last-synced identifier from the
//!   document tail
//! - **Render**: build one sanitized line per task
//! - **Engine**: select past-watermark tasks, render, append, report
//!
//! # Architecture
//!
//! There is no state outside the checklist document itself. The
//! watermark is recomputed from the document's last lines on every run,
//! which is what makes interrupted or repeated runs safe: whatever made
//! it into the file defines what counts as already synced.
//!
//! # Example
//!
//! ```ignore
//! use taskmark::sync;
//!
//! let outcome = sync::sync(Path::new("tasks.yml"), Path::new("todo.md"))?;
//! println!("Imported {} new tasks", outcome.appended);
//! ```

mod engine;
mod file;
mod render;
mod source;
mod watermark;

// Re-export main types and functions
pub use engine::{sync, SyncOutcome};
pub use render::{render_line, RenderedLine};
pub use source::{filter_actionable, load_source, record_id};
pub use watermark::{scan, TAIL_WINDOW_LINES};
