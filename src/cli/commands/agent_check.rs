//! Agent-check command handler

use std::path::Path;

use serde_json::json;

use crate::Result;
use crate::agent;

/// Parse an agent definition file and print its restriction summary.
///
/// Mirrors the `context` command's stdout contract: the result is always a
/// JSON document, and failures become an `{"error": ...}` object so callers
/// never have to parse free-form text.
pub fn execute(file: &Path) -> Result<()> {
    match agent::check_agent_file(file) {
        Ok(summary) => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Err(e) => {
            println!("{}", json!({ "error": e.redacted_message() }));
            std::process::exit(i32::from(e.exit_code()));
        }
    }
}
