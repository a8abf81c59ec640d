//! Context command handler

use std::path::PathBuf;

use serde_json::json;

use crate::Result;
use crate::config;
use crate::context;

/// Print the context bundle for one task as JSON.
///
/// Output always goes to stdout as a single JSON document, so downstream
/// tooling can pipe it without caring about the `--json` flag. Failures are
/// also reported on stdout as an `{"error": ...}` object to keep the stream
/// parseable.
pub fn execute(task_id: &str, source: Option<&PathBuf>) -> Result<()> {
    let source_path = config::resolve_source_path(source.map(PathBuf::as_path));
    let root = config::project_root();

    match context::load_task_context(task_id, &source_path, &root) {
        Ok(bundle) => {
            println!("{}", serde_json::to_string_pretty(&bundle)?);
            Ok(())
        }
        Err(e) => {
            println!("{}", json!({ "error": e.redacted_message() }));
            std::process::exit(i32::from(e.exit_code()));
        }
    }
}
