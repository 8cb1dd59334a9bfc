//! `validate` command

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};

use super::app::EXIT_VALIDATION_FAILED;
use super::output::Output;
use crate::domain::{self, Mode};

/// Validates one task document and prints the report
pub fn run(output: &Output, file: &Path, mode: Mode) -> Result<ExitCode> {
    let path = fs::canonicalize(file)
        .or_else(|_| std::path::absolute(file))
        .with_context(|| format!("Failed to resolve path: {}", file.display()))?;

    if !path.is_file() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read task document: {}", path.display()))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), %mode, "validating");
    let report = domain::validate(&content, mode);
    output.report(&path, &report);

    if report.is_ok() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_VALIDATION_FAILED))
    }
}
