//! Domain logic for task document validation
//!
//! Pure text processing, no I/O. Callers read the document and hand the
//! text to [`validate`].

mod document;
mod report;
mod validate;

pub use document::{
    declared_counts, extract_field, extract_task_blocks, extract_task_refs, has_section,
    has_title, tier_numbers, DeclaredCounts, TaskBlock, TaskDocument, TaskNumber,
};
pub use report::{Mode, Rule, Severity, ValidationReport, Violation};
pub use validate::{validate, BLOCKED_BY_FIELD, BLOCKS_FIELD};
