//! # Command-Line Interface
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `validate <FILE> [--strict]` | Check a task document's structure and dependency graph |
//! | `discover <PATH>` | Find directories whose planning docs need a task document |
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default) - `[WARN]` / `[FAIL]` / `[OK]` lines
//! - `json` - Machine-parseable JSON
//!
//! ## Exit Codes
//!
//! - `0` - success (warnings allowed)
//! - `1` - the document has validation errors
//! - `2` - invocation failure (file not found, bad input path, bad config)
//!
//! ## Entry Point
//!
//! Parse a [`Cli`] and call [`run()`].

mod app;
mod output;
mod validate_cmd;
mod discover_cmd;

pub use app::{run, Cli, Commands, EXIT_INVOCATION_ERROR, EXIT_VALIDATION_FAILED};
pub use output::{Output, OutputFormat};
