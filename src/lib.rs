//! tasks-lint - Validator for generated task planning documents
//!
//! A task document declares a title, a dependency graph section, a summary,
//! numbered task blocks grouped into tiers, and per-task `Blocked by` /
//! `Blocks` metadata. tasks-lint checks the structure and that dependencies
//! only point backwards (`Blocked by`) or forwards (`Blocks`).

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{validate, Mode, ValidationReport, Violation};
