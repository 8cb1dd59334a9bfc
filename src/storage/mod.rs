//! # Storage Layer
//!
//! Filesystem-facing pieces of tasks-lint.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Project config | TOML | `.tasks-lint.toml` (nearest ancestor) |
//! | Global config | TOML | `~/.config/tasks-lint/config.toml` |
//! | Planning docs | Markdown | target directories found by [`discover`] |
//!
//! ## Key Types
//!
//! - [`Config`] - Project and global configuration
//! - [`Target`] - A directory that should receive a task document

mod config;
mod discover;

pub use config::{
    Config, ConfigError, DiscoverConfig, GlobalConfig, OutputFormat, ProjectConfig,
    PROJECT_CONFIG_FILE,
};
pub use discover::{discover, DiscoverError, Target};
