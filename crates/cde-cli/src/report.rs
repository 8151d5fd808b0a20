//! JSON report written by `validate --report`.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Schema identifier stamped into every report.
pub const REPORT_SCHEMA: &str = "cde-quality.validation-report";
/// Bumped when the report layout changes incompatibly.
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Machine readable outcome of one validation run.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    /// File stem of the validated model file.
    pub model: String,
    pub valid: bool,
    /// The diagnostic, present only when the model is invalid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationReport {
    /// Builds a report for one run. `error` carries the diagnostic of a
    /// failed validation; `None` marks the model valid.
    pub fn new(model: &str, error: Option<String>) -> Self {
        ValidationReport {
            schema: REPORT_SCHEMA,
            schema_version: REPORT_SCHEMA_VERSION,
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            model: model.to_string(),
            valid: error.is_none(),
            error,
        }
    }

    /// Writes the report as pretty JSON with a trailing newline.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("encode validation report")?;
        std::fs::write(path, format!("{json}\n"))
            .with_context(|| format!("write report to {}", path.display()))?;
        Ok(())
    }
}
