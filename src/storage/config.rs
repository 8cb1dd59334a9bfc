//! Configuration handling for tasks-lint
//!
//! Configuration is read from `.tasks-lint.toml` (project, found by walking
//! up from the current directory) and `~/.config/tasks-lint/config.toml`
//! (global). Missing files fall back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the project configuration
pub const PROJECT_CONFIG_FILE: &str = ".tasks-lint.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

/// Output format for commands
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings for target discovery
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DiscoverConfig {
    /// Name of the generated task document in each target directory
    pub output_file: String,

    /// Source documents listed first, in this order, when present
    pub preferred_docs: Vec<String>,

    /// Any of these marks a directory as a target
    pub signal_docs: Vec<String>,
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        let names =
            |list: &[&str]| -> Vec<String> { list.iter().map(|s| s.to_string()).collect() };
        Self {
            output_file: "TASKS.md".to_string(),
            preferred_docs: names(&[
                "PRD.md",
                "USER_FLOW.md",
                "BACKEND_ARCHITECTURE.md",
                "FRONTEND_DESIGN.md",
                "README.md",
                "prompt.md",
                "initial_plan.md",
            ]),
            signal_docs: names(&[
                "PRD.md",
                "USER_FLOW.md",
                "BACKEND_ARCHITECTURE.md",
                "FRONTEND_DESIGN.md",
                "prompt.md",
                "initial_plan.md",
                "FEATURE_PROMPT.md",
            ]),
        }
    }
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Validate in strict mode without passing `--strict`
    pub strict: bool,

    /// Discovery settings
    pub discover: DiscoverConfig,
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    /// Path of the project config file, if one was found
    pub project_file: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;

        let start = std::env::current_dir().context("Failed to read current directory")?;
        let project_file = Self::find_project_file(&start);
        let project = match &project_file {
            Some(path) => Self::load_project_file(path)?,
            None => ProjectConfig::default(),
        };

        Ok(Self {
            project,
            global,
            project_file,
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "tasks-lint", "tasks-lint")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        parse(&content, &config_path)
    }

    /// Loads project configuration from a specific file
    pub fn load_project_file(path: &Path) -> Result<ProjectConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read project config: {}", path.display()))?;

        parse(&content, path)
    }

    /// Finds `.tasks-lint.toml` in `start` or its nearest ancestor
    pub fn find_project_file(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(PROJECT_CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }
}

fn parse<T: for<'de> Deserialize<'de>>(content: &str, path: &Path) -> Result<T> {
    toml::from_str(content)
        .map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
        .map_err(anyhow::Error::from)
}
