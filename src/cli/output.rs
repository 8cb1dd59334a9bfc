//! Output formatting for CLI commands

use std::path::Path;

use serde::Serialize;

use crate::domain::ValidationReport;
pub use crate::storage::OutputFormat;

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Prints an invocation error
    pub fn error(&self, message: &str) {
        match self.format {
            OutputFormat::Text => eprintln!("[ERROR] {}", message),
            OutputFormat::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "success": false,
                        "error": message
                    })
                );
            }
        }
    }

    /// Prints `data` as one line of JSON. Callers check [`Output::is_json`] first.
    pub fn json<T: Serialize>(&self, data: &T) {
        if let Ok(json) = serde_json::to_string(data) {
            println!("{}", json);
        }
    }

    /// Prints a validation report for `path`.
    ///
    /// Text mode prints warnings first, then either the failures or a
    /// single `[OK]` line.
    pub fn report(&self, path: &Path, report: &ValidationReport) {
        if self.is_json() {
            self.json(&serde_json::json!({
                "path": path.display().to_string(),
                "mode": report.mode(),
                "ok": report.is_ok(),
                "errors": report.errors(),
                "warnings": report.warnings(),
            }));
            return;
        }

        if report.has_warnings() {
            println!("[WARN] {}", path.display());
            for warning in report.warnings() {
                println!("  - {}", warning);
            }
        }

        if report.has_errors() {
            println!("[FAIL] {}", path.display());
            for error in report.errors() {
                println!("  - {}", error);
            }
        } else {
            println!("[OK] {}", path.display());
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}
