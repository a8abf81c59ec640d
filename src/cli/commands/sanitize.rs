//! Sanitize command handler

use serde_json::json;

use crate::Result;
use crate::sanitize;

pub fn execute(text: Option<&str>, json: bool) -> Result<()> {
    let Some(text) = text else {
        eprintln!("Usage: taskmark sanitize <TEXT>");
        std::process::exit(1);
    };

    let outcome = sanitize::sanitize_goal(text);

    if json {
        let warnings: Vec<String> = outcome.warnings.iter().map(ToString::to_string).collect();
        println!(
            "{}",
            json!({
                "sanitized": outcome.text,
                "warnings": warnings,
            })
        );
    } else {
        for warning in &outcome.warnings {
            eprintln!("⚠️  Warning: {warning}");
        }
        println!("{}", outcome.text);
    }

    Ok(())
}
