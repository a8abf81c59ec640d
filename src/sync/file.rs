//! File primitives for the sync path.
//!
//! The checklist document is touched by exactly two short-lived handles
//! per run: a read handle for the watermark scan and an append handle
//! for the write-back. Appending is a single open-append-close cycle so
//! a crash mid-run never leaves a line written twice.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::error::Result;

/// Create an empty file if it does not already exist.
///
/// Never truncates existing content.
///
/// # Errors
///
/// Returns an error if the file cannot be created.
pub fn touch(path: &Path) -> Result<()> {
    OpenOptions::new().create(true).append(true).open(path)?;
    Ok(())
}

/// Read at most the last `max` lines of a file.
///
/// Streams the file through a bounded window, so memory use is
/// proportional to `max`, not to the file size.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read; a missing
/// file surfaces as an `Io` error with `NotFound` kind for the caller
/// to handle.
pub fn tail_lines(path: &Path, max: usize) -> Result<Vec<String>> {
    if max == 0 {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut window: VecDeque<String> = VecDeque::with_capacity(max);
    for line in reader.lines() {
        let line = line?;
        if window.len() == max {
            window.pop_front();
        }
        window.push_back(line);
    }

    Ok(window.into())
}

/// Append rendered lines to a file in one open-append-close cycle.
///
/// All lines are written with a single `write_all` and synced to disk
/// before the handle closes. An empty batch is a no-op and does not
/// create the file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or written.
pub fn append_lines(path: &Path, lines: &[String]) -> Result<()> {
    if lines.is_empty() {
        return Ok(());
    }

    let mut content = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;

    Ok(())
}
