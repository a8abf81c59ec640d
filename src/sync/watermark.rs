//! Watermark recovery from the checklist document tail.
//!
//! The watermark is the task number of the newest synced entry. It is
//! recomputed from the document itself on every run and never persisted
//! anywhere else; a separate index could go stale against the document,
//! this cannot.

use std::io;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::sync::file;

/// How many trailing lines the scan inspects.
pub const TAIL_WINDOW_LINES: usize = 100;

static TASK_HASHTAG_CAPTURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#task-(\d+)").unwrap()
});

/// Recover the watermark from a checklist document.
///
/// Reads at most the last [`TAIL_WINDOW_LINES`] lines and scans them in
/// reverse for a `#task-<digits>` hashtag, returning the first capture
/// found. That is the first match walking backward, not the numeric
/// maximum: entries are appended in increasing identifier order, so the
/// newest identifier sits nearest the end. Manual edits that reorder
/// the tail can make this under- or over-estimate; that is an accepted
/// approximation, not an error.
///
/// A missing document is created empty — the one permitted side effect
/// of an otherwise read-only scan — and yields 0, as does a document
/// with no matching hashtag in the window.
///
/// # Errors
///
/// Returns an error only for I/O failures other than the file being
/// absent.
pub fn scan(checklist: &Path) -> Result<u64> {
    let tail = match file::tail_lines(checklist, TAIL_WINDOW_LINES) {
        Ok(lines) => lines,
        Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            file::touch(checklist)?;
            debug!(path = %checklist.display(), "created empty checklist document");
            return Ok(0);
        }
        Err(e) => return Err(e),
    };

    for line in tail.iter().rev() {
        if let Some(caps) = TASK_HASHTAG_CAPTURE.captures(line) {
            // Number wider than u64 behaves like an unreachable
            // watermark rather than a scan failure.
            let number = caps[1].parse().unwrap_or(u64::MAX);
            debug!(watermark = number, "recovered watermark from tail");
            return Ok(number);
        }
    }

    debug!("no watermark in tail window");
    Ok(0)
}
