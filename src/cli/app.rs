//! Main CLI application structure

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{discover_cmd, validate_cmd};
use crate::domain::Mode;
use crate::storage::Config;

/// Exit code for a document with validation errors
pub const EXIT_VALIDATION_FAILED: u8 = 1;

/// Exit code for invocation failures (missing file, bad input path, bad config)
pub const EXIT_INVOCATION_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "tasks-lint")]
#[command(author, version, about = "Validate generated task planning documents")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the structure and dependency graph of a task document
    Validate {
        /// Path to the task document (e.g. TASKS.md)
        file: PathBuf,

        /// Treat numbering, ordering and count issues as errors instead of warnings.
        /// `--strict=false` turns off `strict = true` from the project config.
        #[arg(
            long,
            env = "TASKS_LINT_STRICT",
            num_args = 0..=1,
            require_equals = true,
            default_missing_value = "true",
            value_parser = clap::builder::BoolishValueParser::new()
        )]
        strict: Option<bool>,
    },

    /// Find directories whose planning docs should get a task document
    Discover {
        /// Markdown file or directory to search
        path: PathBuf,
    },
}

/// Runs a parsed command line and returns the process exit code
pub fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::load()?;
    if let Some(path) = &config.project_file {
        tracing::debug!(path = %path.display(), "loaded project config");
    }

    let format = cli.format.unwrap_or(config.global.default_format);
    let output = Output::new(format);

    let result = match cli.command {
        Commands::Validate { file, strict } => {
            // Flag, then environment, then project config
            let mode = Mode::from_strict(strict.unwrap_or(config.project.strict));
            validate_cmd::run(&output, &file, mode)
        }
        Commands::Discover { path } => {
            discover_cmd::run(&output, &path, &config.project.discover)
        }
    };

    result.or_else(|e| {
        output.error(&format!("{:#}", e));
        Ok(ExitCode::from(EXIT_INVOCATION_ERROR))
    })
}
