//! Configuration management.
//!
//! Resolves where the task source and the checklist document live. Both
//! default to conventional filenames in the working directory, so
//! `taskmark sync` needs no flags when run from the project root. The
//! CLI layer feeds `--source`/`--checklist` (or their environment
//! variables) through the `explicit` parameter; this module only knows
//! explicit-or-default.

use std::path::{Path, PathBuf};

/// Conventional task source filename.
pub const SOURCE_FILENAME: &str = "tasks.yml";

/// Conventional checklist document filename.
pub const CHECKLIST_FILENAME: &str = "todo.md";

/// Resolve the task source path: the explicit path if given, else
/// `tasks.yml` in the current directory.
#[must_use]
pub fn resolve_source_path(explicit: Option<&Path>) -> PathBuf {
    resolve(explicit, SOURCE_FILENAME)
}

/// Resolve the checklist document path: the explicit path if given,
/// else `todo.md` in the current directory.
#[must_use]
pub fn resolve_checklist_path(explicit: Option<&Path>) -> PathBuf {
    resolve(explicit, CHECKLIST_FILENAME)
}

fn resolve(explicit: Option<&Path>, default: &str) -> PathBuf {
    explicit.map_or_else(|| PathBuf::from(default), Path::to_path_buf)
}

/// Get the project root used for path containment checks.
///
/// The working directory anchors every relative document reference; a
/// reference may never resolve outside it.
#[must_use]
pub fn project_root() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
