//! Discovery of task document targets
//!
//! A target is a directory holding planning documents (PRD, user flows,
//! architecture notes) that should get a generated task document next to
//! them. Discovery looks at the given directory and its immediate children.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;

use super::config::DiscoverConfig;

#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("Input file must be a markdown document (.md): {}", .0.display())]
    NotMarkdown(PathBuf),

    #[error("Input path must be an existing file or directory: {}", .0.display())]
    InvalidPath(PathBuf),
}

/// A directory that should receive a task document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    pub target_dir: PathBuf,
    pub output_file: PathBuf,
    /// Candidate planning documents, preferred names first
    pub source_docs: Vec<PathBuf>,
}

/// Discovers targets for a markdown file or a directory
pub fn discover(path: &Path, config: &DiscoverConfig) -> Result<Vec<Target>> {
    if path.is_file() {
        if !is_markdown_file(path) {
            return Err(DiscoverError::NotMarkdown(path.to_path_buf()).into());
        }

        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let mut source_docs = vec![path.to_path_buf()];
        source_docs.extend(
            ordered_docs(parent, config)?
                .into_iter()
                .filter(|doc| doc != path),
        );

        return Ok(vec![Target {
            target_dir: parent.to_path_buf(),
            output_file: parent.join(&config.output_file),
            source_docs,
        }]);
    }

    if !path.is_dir() {
        return Err(DiscoverError::InvalidPath(path.to_path_buf()).into());
    }

    let mut candidates = Vec::new();

    if has_planning_docs(path, config)? {
        candidates.push(to_target(path, config)?);
    }

    for child in child_dirs(path)? {
        if has_planning_docs(&child, config)? {
            candidates.push(to_target(&child, config)?);
        }
    }

    if candidates.is_empty() && !markdown_docs(path, config)?.is_empty() {
        candidates.push(to_target(path, config)?);
    }

    let targets = dedupe(candidates);
    tracing::info!(path = %path.display(), count = targets.len(), "discovered targets");
    Ok(targets)
}

fn is_markdown_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn sort_by_lowercase_name(paths: &mut [PathBuf]) {
    paths.sort_by_cached_key(|p| file_name(p).to_lowercase());
}

fn read_dir_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry = entry.context("Failed to read directory entry")?;
        paths.push(entry.path());
    }
    Ok(paths)
}

/// Markdown files in `dir` except the output document, by lowercase name
fn markdown_docs(dir: &Path, config: &DiscoverConfig) -> Result<Vec<PathBuf>> {
    let mut docs: Vec<PathBuf> = read_dir_paths(dir)?
        .into_iter()
        .filter(|p| is_markdown_file(p) && file_name(p) != config.output_file)
        .collect();
    sort_by_lowercase_name(&mut docs);
    Ok(docs)
}

/// Preferred documents in configured order, then the rest
fn ordered_docs(dir: &Path, config: &DiscoverConfig) -> Result<Vec<PathBuf>> {
    let docs = markdown_docs(dir, config)?;

    let mut ordered: Vec<PathBuf> = config
        .preferred_docs
        .iter()
        .filter_map(|name| docs.iter().find(|doc| file_name(doc) == *name).cloned())
        .collect();

    let rest: Vec<PathBuf> = docs
        .into_iter()
        .filter(|doc| !config.preferred_docs.contains(&file_name(doc)))
        .collect();
    ordered.extend(rest);

    Ok(ordered)
}

fn has_planning_docs(dir: &Path, config: &DiscoverConfig) -> Result<bool> {
    let docs = markdown_docs(dir, config)?;
    Ok(docs
        .iter()
        .any(|doc| config.signal_docs.contains(&file_name(doc))))
}

fn child_dirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = read_dir_paths(dir)?
        .into_iter()
        .filter(|p| p.is_dir())
        .collect();
    sort_by_lowercase_name(&mut dirs);
    Ok(dirs)
}

fn to_target(dir: &Path, config: &DiscoverConfig) -> Result<Target> {
    Ok(Target {
        target_dir: dir.to_path_buf(),
        output_file: dir.join(&config.output_file),
        source_docs: ordered_docs(dir, config)?,
    })
}

/// Keeps the first target for each output file
fn dedupe(targets: Vec<Target>) -> Vec<Target> {
    let mut seen = HashSet::new();
    targets
        .into_iter()
        .filter(|t| seen.insert(t.output_file.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "# doc\n").unwrap();
        path
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths.iter().map(|p| file_name(p)).collect()
    }

    #[test]
    fn directory_with_planning_docs() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "notes.md");
        touch(dir.path(), "README.md");
        touch(dir.path(), "PRD.md");
        touch(dir.path(), "TASKS.md");
        touch(dir.path(), "data.json");

        let targets = discover(dir.path(), &DiscoverConfig::default()).unwrap();
        assert_eq!(targets.len(), 1);

        let target = &targets[0];
        assert_eq!(target.target_dir, dir.path());
        assert_eq!(target.output_file, dir.path().join("TASKS.md"));
        assert_eq!(names(&target.source_docs), vec!["PRD.md", "README.md", "notes.md"]);
    }

    #[test]
    fn child_directories_are_targets() {
        let dir = TempDir::new().unwrap();
        for child in ["beta", "Alpha", "empty"] {
            fs::create_dir(dir.path().join(child)).unwrap();
        }
        touch(&dir.path().join("beta"), "prompt.md");
        touch(&dir.path().join("Alpha"), "USER_FLOW.md");
        touch(&dir.path().join("empty"), "random.md");

        let targets = discover(dir.path(), &DiscoverConfig::default()).unwrap();
        let dirs: Vec<_> = targets.iter().map(|t| file_name(&t.target_dir)).collect();
        assert_eq!(dirs, vec!["Alpha", "beta"]);
    }

    #[test]
    fn root_is_listed_before_children() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "PRD.md");
        fs::create_dir(dir.path().join("api")).unwrap();
        touch(&dir.path().join("api"), "BACKEND_ARCHITECTURE.md");

        let targets = discover(dir.path(), &DiscoverConfig::default()).unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].target_dir, dir.path());
        assert_eq!(targets[1].target_dir, dir.path().join("api"));
    }

    #[test]
    fn falls_back_to_any_markdown() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "ideas.md");

        let targets = discover(dir.path(), &DiscoverConfig::default()).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(names(&targets[0].source_docs), vec!["ideas.md"]);
    }

    #[test]
    fn empty_directory_has_no_targets() {
        let dir = TempDir::new().unwrap();
        let targets = discover(dir.path(), &DiscoverConfig::default()).unwrap();
        assert!(targets.is_empty());
    }

    #[test]
    fn file_input_comes_first() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "PRD.md");
        let input = touch(dir.path(), "zz-feature.md");

        let targets = discover(&input, &DiscoverConfig::default()).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(names(&targets[0].source_docs), vec!["zz-feature.md", "PRD.md"]);
    }

    #[test]
    fn non_markdown_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("plan.txt");
        fs::write(&input, "text").unwrap();

        let err = discover(&input, &DiscoverConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DiscoverError>(),
            Some(DiscoverError::NotMarkdown(_))
        ));
    }

    #[test]
    fn missing_path_is_rejected() {
        let dir = TempDir::new().unwrap();
        let err = discover(&dir.path().join("nope"), &DiscoverConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DiscoverError>(),
            Some(DiscoverError::InvalidPath(_))
        ));
    }

    #[test]
    fn custom_output_file_is_excluded() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "PRD.md");
        touch(dir.path(), "PLAN.md");

        let config = DiscoverConfig {
            output_file: "PLAN.md".to_string(),
            ..DiscoverConfig::default()
        };
        let targets = discover(dir.path(), &config).unwrap();
        assert_eq!(targets[0].output_file, dir.path().join("PLAN.md"));
        assert_eq!(names(&targets[0].source_docs), vec!["PRD.md"]);
    }

    #[test]
    fn dedupe_keeps_first() {
        let target = |doc: &str| Target {
            target_dir: PathBuf::from("/p"),
            output_file: PathBuf::from("/p/TASKS.md"),
            source_docs: vec![PathBuf::from(doc)],
        };

        let deduped = dedupe(vec![target("a.md"), target("b.md")]);
        assert_eq!(deduped, vec![target("a.md")]);
    }
}
