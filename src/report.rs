//! Validation report rendering.
//!
//! Quality gates write their results as JSON; this module reads such a
//! report and renders it as a color-coded text summary or re-emits it as
//! normalized JSON. Rendering is pure presentation: the report's own
//! summary block is authoritative for pass/fail counts, and nothing here
//! recomputes or second-guesses it.
//!
//! Parsing is lenient by contract. Gates written by older tooling may
//! omit fields, so every field has a fallback ("Unknown Gate", "No
//! message") rather than a hard failure; only an unreadable file or
//! broken JSON is an error.

use std::fmt::Write as _;
use std::io::ErrorKind;
use std::path::Path;

use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{Error, Result};

const RULE_WIDTH: usize = 60;

fn default_error_file() -> String {
    "unknown".to_string()
}

fn default_error_message() -> String {
    "No message".to_string()
}

fn default_gate_name() -> String {
    "Unknown Gate".to_string()
}

fn default_unknown() -> String {
    "unknown".to_string()
}

// ── report model ──

/// A single finding inside a gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateError {
    #[serde(default = "default_error_file")]
    pub file: String,
    #[serde(default)]
    pub line: Option<u64>,
    #[serde(default = "default_error_message")]
    pub message: String,
    #[serde(default)]
    pub suggestion: Option<String>,
}

impl GateError {
    fn render(&self) -> String {
        let mut location = self.file.clone();
        if let Some(line) = self.line {
            let _ = write!(location, ":{line}");
        }

        let mut out = format!("  {} {location}\n     {}\n", "❌".red(), self.message);
        if let Some(suggestion) = &self.suggestion {
            let _ = writeln!(out, "     {}", format!("💡 {suggestion}").cyan());
        }
        out
    }
}

/// One gate's outcome. Status stays a free string so unknown statuses
/// survive a parse/render round trip; anything that is not `passed` or
/// `failed` displays as skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateResult {
    #[serde(default = "default_gate_name")]
    pub name: String,
    #[serde(default = "default_unknown")]
    pub layer: String,
    #[serde(default = "default_unknown")]
    pub status: String,
    #[serde(default)]
    pub errors: Vec<GateError>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub auto_fixed: u64,
    #[serde(default)]
    pub execution_time: Option<f64>,
}

impl GateResult {
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.status == "passed"
    }

    fn render_status(&self) -> String {
        match self.status.as_str() {
            "passed" => "✅ PASSED".green().to_string(),
            "failed" => "❌ FAILED".red().to_string(),
            _ => "⚠️  SKIPPED".yellow().to_string(),
        }
    }

    fn render_detailed(&self) -> String {
        let mut out = format!("\n{}\n", "─".repeat(RULE_WIDTH).bold());
        let _ = writeln!(out, "{} ({})", self.name.bold(), self.layer);
        let _ = writeln!(out, "Status: {}", self.render_status());

        if let Some(seconds) = self.execution_time {
            let _ = writeln!(out, "Time: {seconds:.2}s");
        }
        if self.auto_fixed > 0 {
            let _ = writeln!(
                out,
                "{}",
                format!("Auto-fixed: {} issues", self.auto_fixed).yellow()
            );
        }

        if !self.errors.is_empty() {
            let _ = writeln!(
                out,
                "\n{}",
                format!("Errors ({}):", self.errors.len()).red()
            );
            for error in &self.errors {
                out.push_str(&error.render());
            }
        }
        if !self.warnings.is_empty() {
            let _ = writeln!(
                out,
                "\n{}",
                format!("Warnings ({}):", self.warnings.len()).yellow()
            );
            for warning in &self.warnings {
                let _ = writeln!(out, "  ⚠️  {warning}");
            }
        }

        out
    }
}

#[derive(Debug, Default, Deserialize)]
struct ReportSummary {
    total_gates: Option<u64>,
    #[serde(default)]
    passed: u64,
    #[serde(default)]
    failed: u64,
    #[serde(default)]
    auto_fixed: u64,
    timestamp: Option<String>,
    project_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawReport {
    #[serde(default)]
    gates: Vec<GateResult>,
    #[serde(default)]
    summary: ReportSummary,
}

/// A parsed validation report: gate results plus the summary counters
/// the gate runner computed when it wrote the file.
#[derive(Debug)]
pub struct ValidationReport {
    pub gates: Vec<GateResult>,
    pub total_gates: u64,
    pub passed_gates: u64,
    pub failed_gates: u64,
    pub auto_fixed_total: u64,
    pub timestamp: Option<String>,
    pub project_path: Option<String>,
}

impl ValidationReport {
    fn from_raw(raw: RawReport) -> Self {
        let gate_count = raw.gates.len() as u64;
        Self {
            gates: raw.gates,
            total_gates: raw.summary.total_gates.unwrap_or(gate_count),
            passed_gates: raw.summary.passed,
            failed_gates: raw.summary.failed,
            auto_fixed_total: raw.summary.auto_fixed,
            timestamp: raw.summary.timestamp,
            project_path: raw.summary.project_path,
        }
    }

    /// Success means the summary recorded zero failed gates.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed_gates == 0
    }

    fn render_summary(&self) -> String {
        let rule = "═".repeat(RULE_WIDTH);
        let mut out = format!(
            "\n{}\n{}\n{}\n\n",
            rule.bold(),
            "VALIDATION REPORT SUMMARY".bold(),
            rule.bold()
        );

        if let Some(project) = &self.project_path {
            let _ = writeln!(out, "Project: {project}");
        }
        if let Some(timestamp) = &self.timestamp {
            let _ = writeln!(out, "Timestamp: {timestamp}");
        }

        let _ = writeln!(out, "\nTotal Gates: {}", self.total_gates);
        let _ = writeln!(out, "{}", format!("Passed: {}", self.passed_gates).green());
        if self.failed_gates > 0 {
            let _ = writeln!(out, "{}", format!("Failed: {}", self.failed_gates).red());
        } else {
            let _ = writeln!(out, "Failed: {}", self.failed_gates);
        }
        if self.auto_fixed_total > 0 {
            let _ = writeln!(
                out,
                "{}",
                format!("Auto-fixed: {}", self.auto_fixed_total).yellow()
            );
        }

        let verdict = if self.is_success() {
            "✅ ALL GATES PASSED".green().to_string()
        } else {
            "❌ VALIDATION FAILED".red().to_string()
        };
        let _ = writeln!(out, "\n{}{verdict}", "Overall Status: ".bold());

        out
    }

    /// Render the full text report: summary, per-gate detail, verdict,
    /// and (on failure) a numbered list of fix suggestions collected
    /// from every non-passing gate.
    #[must_use]
    pub fn render_text(&self) -> String {
        let rule = "═".repeat(RULE_WIDTH);
        let mut out = self.render_summary();

        let _ = write!(
            out,
            "\n{}\n{}\n{}\n",
            rule.bold(),
            "GATE RESULTS".bold(),
            rule.bold()
        );
        for gate in &self.gates {
            out.push_str(&gate.render_detailed());
        }

        let _ = writeln!(out, "\n{}", rule.bold());
        if self.is_success() {
            let _ = writeln!(out, "{}", "✅ VALIDATION SUCCESSFUL".green().bold());
        } else {
            let _ = writeln!(out, "{}", "❌ VALIDATION FAILED".red().bold());
            let _ = writeln!(out, "\n{}", "Suggestions for fixes:".yellow());

            let mut failed_count = 0;
            for gate in self.gates.iter().filter(|g| !g.is_passed()) {
                failed_count += 1;
                let _ = writeln!(out, "\n{failed_count}. {}:", gate.name);

                if gate.errors.is_empty() {
                    let _ = writeln!(out, "   • Review {} requirements", gate.layer);
                } else {
                    for error in &gate.errors {
                        if let Some(suggestion) = &error.suggestion {
                            let _ = writeln!(out, "   • {suggestion}");
                        }
                    }
                }
            }
        }
        let _ = writeln!(out, "{}", rule.bold());

        out
    }

    /// Normalized JSON form with a computed `success` flag in the summary.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "summary": {
                "total_gates": self.total_gates,
                "passed": self.passed_gates,
                "failed": self.failed_gates,
                "auto_fixed": self.auto_fixed_total,
                "success": self.is_success(),
                "timestamp": self.timestamp,
                "project_path": self.project_path,
            },
            "gates": self.gates,
        })
    }
}

// ── loading ──

/// Read and parse a JSON validation report.
///
/// # Errors
///
/// Returns [`Error::Report`] when the file is missing or not valid
/// JSON; both carry exit code 2 so gate failures (exit 1) stay
/// distinguishable from tooling problems.
pub fn load_report(path: &Path) -> Result<ValidationReport> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            Error::Report(format!("Report file not found: {}", path.display()))
        } else {
            Error::Io(e)
        }
    })?;
    let raw: RawReport = serde_json::from_str(&content)
        .map_err(|e| Error::Report(format!("Invalid JSON in report file: {e}")))?;
    Ok(ValidationReport::from_raw(raw))
}

// ── tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const FAILED_REPORT: &str = r#"{
        "summary": {
            "total_gates": 2,
            "passed": 1,
            "failed": 1,
            "auto_fixed": 3,
            "timestamp": "2025-06-01T12:00:00Z",
            "project_path": "/work/demo"
        },
        "gates": [
            {
                "name": "Schema Check",
                "layer": "structure",
                "status": "passed",
                "errors": [],
                "warnings": [],
                "auto_fixed": 3,
                "execution_time": 0.41
            },
            {
                "name": "Lint",
                "layer": "style",
                "status": "failed",
                "errors": [
                    {
                        "file": "tasks.yml",
                        "line": 7,
                        "message": "Unknown status value",
                        "suggestion": "Use one of: pending, completed"
                    }
                ],
                "warnings": ["trailing whitespace"]
            }
        ]
    }"#;

    fn write_report(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("report.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_report_reads_summary_and_gates() {
        let dir = TempDir::new().unwrap();
        let report = load_report(&write_report(&dir, FAILED_REPORT)).unwrap();

        assert_eq!(report.total_gates, 2);
        assert_eq!(report.passed_gates, 1);
        assert_eq!(report.failed_gates, 1);
        assert_eq!(report.auto_fixed_total, 3);
        assert!(!report.is_success());
        assert_eq!(report.gates.len(), 2);
        assert!(report.gates[0].is_passed());
    }

    #[test]
    fn test_missing_summary_falls_back_to_gate_count() {
        let dir = TempDir::new().unwrap();
        let json = r#"{"gates": [{"name": "A", "layer": "l", "status": "passed"}]}"#;
        let report = load_report(&write_report(&dir, json)).unwrap();

        assert_eq!(report.total_gates, 1);
        assert_eq!(report.failed_gates, 0);
        // summary is authoritative; absent counters mean success
        assert!(report.is_success());
    }

    #[test]
    fn test_missing_error_fields_get_placeholders() {
        let dir = TempDir::new().unwrap();
        let json = r#"{"gates": [{"status": "failed", "errors": [{}]}]}"#;
        let report = load_report(&write_report(&dir, json)).unwrap();

        let gate = &report.gates[0];
        assert_eq!(gate.name, "Unknown Gate");
        assert_eq!(gate.layer, "unknown");
        assert_eq!(gate.errors[0].file, "unknown");
        assert_eq!(gate.errors[0].message, "No message");
    }

    #[test]
    fn test_render_text_failure_lists_suggestions() {
        let dir = TempDir::new().unwrap();
        let report = load_report(&write_report(&dir, FAILED_REPORT)).unwrap();
        let text = report.render_text();

        assert!(text.contains("VALIDATION REPORT SUMMARY"));
        assert!(text.contains("Project: /work/demo"));
        assert!(text.contains("Total Gates: 2"));
        assert!(text.contains("Lint"));
        assert!(text.contains("tasks.yml:7"));
        assert!(text.contains("Unknown status value"));
        assert!(text.contains("Suggestions for fixes:"));
        assert!(text.contains("1. Lint:"));
        assert!(text.contains("• Use one of: pending, completed"));
    }

    #[test]
    fn test_render_text_success_has_no_suggestions() {
        let report = ValidationReport {
            gates: vec![GateResult {
                name: "Schema Check".to_string(),
                layer: "structure".to_string(),
                status: "passed".to_string(),
                errors: Vec::new(),
                warnings: Vec::new(),
                auto_fixed: 0,
                execution_time: None,
            }],
            total_gates: 1,
            passed_gates: 1,
            failed_gates: 0,
            auto_fixed_total: 0,
            timestamp: None,
            project_path: None,
        };
        let text = report.render_text();

        assert!(text.contains("✅ VALIDATION SUCCESSFUL"));
        assert!(text.contains("✅ ALL GATES PASSED"));
        assert!(!text.contains("Suggestions for fixes:"));
    }

    #[test]
    fn test_gate_without_suggestions_points_at_layer() {
        let report = ValidationReport {
            gates: vec![GateResult {
                name: "Security".to_string(),
                layer: "hardening".to_string(),
                status: "skipped".to_string(),
                errors: Vec::new(),
                warnings: Vec::new(),
                auto_fixed: 0,
                execution_time: None,
            }],
            total_gates: 1,
            passed_gates: 0,
            failed_gates: 1,
            auto_fixed_total: 0,
            timestamp: None,
            project_path: None,
        };
        let text = report.render_text();

        assert!(text.contains("⚠️  SKIPPED"));
        assert!(text.contains("• Review hardening requirements"));
    }

    #[test]
    fn test_to_json_shape() {
        let dir = TempDir::new().unwrap();
        let report = load_report(&write_report(&dir, FAILED_REPORT)).unwrap();
        let value = report.to_json();

        assert_eq!(value["summary"]["total_gates"], 2);
        assert_eq!(value["summary"]["success"], false);
        assert_eq!(value["summary"]["timestamp"], "2025-06-01T12:00:00Z");
        assert_eq!(value["gates"][1]["errors"][0]["file"], "tasks.yml");
        assert_eq!(value["gates"][1]["warnings"][0], "trailing whitespace");
    }

    #[test]
    fn test_missing_report_file_is_a_report_error() {
        let dir = TempDir::new().unwrap();
        let err = load_report(&dir.path().join("absent.json")).unwrap_err();

        assert!(matches!(err, Error::Report(_)));
        assert_eq!(err.error_code().exit_code(), 2);
        assert!(err.to_string().contains("Report file not found"));
    }

    #[test]
    fn test_invalid_json_is_a_report_error() {
        let dir = TempDir::new().unwrap();
        let err = load_report(&write_report(&dir, "{not json")).unwrap_err();

        assert!(matches!(err, Error::Report(_)));
        assert!(err.to_string().contains("Invalid JSON in report file"));
    }
}
