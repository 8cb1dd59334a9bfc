//! `discover` command

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};

use super::output::Output;
use crate::storage::{self, DiscoverConfig, Target};

/// Discovers targets under `path` and prints them
pub fn run(output: &Output, path: &Path, config: &DiscoverConfig) -> Result<ExitCode> {
    let path = fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .with_context(|| format!("Failed to resolve path: {}", path.display()))?;

    let targets = storage::discover(&path, config)?;

    if output.is_json() {
        output.json(&targets);
    } else {
        let cwd = std::env::current_dir()
            .and_then(fs::canonicalize)
            .unwrap_or_default();
        print_targets(&targets, &cwd);
    }

    Ok(ExitCode::SUCCESS)
}

fn print_targets(targets: &[Target], cwd: &Path) {
    println!("Found {} target(s).", targets.len());

    for (index, target) in targets.iter().enumerate() {
        println!();
        println!(
            "{}. Target directory: {}",
            index + 1,
            relative(&target.target_dir, cwd)
        );
        println!("   Output: {}", relative(&target.output_file, cwd));
        println!("   Source docs:");

        if target.source_docs.is_empty() {
            println!("   - (none)");
            continue;
        }
        for doc in &target.source_docs {
            println!("   - {}", relative(doc, cwd));
        }
    }
}

/// Shows `path` relative to `cwd` when it lives underneath it
fn relative(path: &Path, cwd: &Path) -> String {
    match path.strip_prefix(cwd) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => rel.display().to_string(),
        Err(_) => path.display().to_string(),
    }
}
