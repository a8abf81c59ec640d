//! Fix command handler

use std::path::Path;

use serde_json::json;

use crate::Result;
use crate::fix;

/// Apply the auto-fixers to one file, reporting whether it changed.
///
/// Exit code 1 on "no changes needed" lets shell pipelines distinguish
/// "fixed something" from "already clean" without diffing the file.
pub fn execute(file: &Path, json: bool) -> Result<()> {
    let changed = fix::fix_file(file)?;

    if json {
        println!("{}", json!({ "file": file.display().to_string(), "changed": changed }));
    } else if changed {
        println!("Fixed: {}", file.display());
    } else {
        println!("No changes needed: {}", file.display());
    }

    if !changed {
        std::process::exit(1);
    }
    Ok(())
}
