//! Report command handler

use std::path::Path;

use crate::Result;
use crate::cli::ReportFormat;
use crate::report;

/// Render a validation report, then exit 1 if any gate failed.
///
/// The failure exit happens after rendering so callers always get the
/// full report before the status code. Load errors propagate to the
/// caller and exit with code 2 instead.
pub fn execute(file: &Path, format: ReportFormat, json: bool) -> Result<()> {
    let report = report::load_report(file)?;

    if json || format == ReportFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report.to_json())?);
    } else {
        print!("{}", report.render_text());
    }

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
