//! tasks-lint - Validate generated task planning documents

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tasks_lint::cli::{self, Cli};

fn main() -> ExitCode {
    let args = Cli::parse();
    init_logging(args.verbose);

    match cli::run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[ERROR] {:#}", e);
            ExitCode::from(cli::EXIT_INVOCATION_ERROR)
        }
    }
}

/// Logs go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "tasks_lint=debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();
}
