//! Structural and dependency-graph checks for task documents
//!
//! [`validate`] is a pure function of the text and the [`Mode`]. It never
//! stops at the first problem: every check runs and contributes to the
//! report, except that per-task checks are skipped when the document has no
//! task headings at all.
//!
//! Detection order is part of the output contract:
//!
//! 1. Title, required sections
//! 2. Task headings present
//! 3. Duplicate IDs, heading order, contiguity
//! 4. Declared count line (task count, then tier count)
//! 5. Per task in document order: missing fields, then `Blocked by`
//!    references, then `Blocks` references

use std::collections::BTreeSet;

use super::document::{self, TaskBlock, TaskDocument, TaskNumber};
use super::report::{Mode, Rule, ValidationReport};

pub const BLOCKED_BY_FIELD: &str = "Blocked by";
pub const BLOCKS_FIELD: &str = "Blocks";

const REQUIRED_SECTIONS: [&str; 2] = ["Dependency Graph", "Summary"];

/// Validates a task document and returns every violation found
pub fn validate(text: &str, mode: Mode) -> ValidationReport {
    let mut report = ValidationReport::new(mode);

    check_structure(text, &mut report);

    let doc = TaskDocument::parse(text);
    tracing::debug!(blocks = doc.blocks().len(), %mode, "extracted task blocks");

    if doc.blocks().is_empty() {
        report.record(
            Rule::NoTaskHeadings,
            "No task headings found. Expected headings like '### T1: ...'.",
        );
        return report;
    }

    let defined = check_numbering(&doc, &mut report);
    check_declared_counts(text, &defined, &mut report);

    for block in doc.blocks() {
        check_references(&doc, block, &defined, &mut report);
    }

    report
}

fn check_structure(text: &str, report: &mut ValidationReport) {
    if !document::has_title(text) {
        report.record(
            Rule::Title,
            "Missing or invalid title. Expected '# <Feature> - Implementation Tasks'.",
        );
    }

    for section in REQUIRED_SECTIONS {
        if !document::has_section(text, section) {
            report.record(
                Rule::MissingSection,
                format!("Missing required section: '## {}'.", section),
            );
        }
    }
}

/// Checks uniqueness, order and contiguity. Returns the defined task IDs.
fn check_numbering(
    doc: &TaskDocument<'_>,
    report: &mut ValidationReport,
) -> BTreeSet<TaskNumber> {
    let numbers = doc.task_numbers();
    let unique: BTreeSet<TaskNumber> = numbers.iter().cloned().collect();

    if unique.len() != numbers.len() {
        report.record(
            Rule::DuplicateTaskIds,
            "Task IDs must be unique. Duplicate task IDs detected.",
        );
    }

    if !numbers.is_sorted() {
        report.record(
            Rule::HeadingOrder,
            format!(
                "Task headings are not in ascending numeric order. Found order: {}",
                id_list(&numbers)
            ),
        );
    }

    // Distinct positive IDs fill 1..=max exactly when there are max of them
    let starts_at_one = unique.first().is_some_and(|first| *first == 1);
    let fills_range = unique.last() == Some(&TaskNumber::from(unique.len()));
    if !(starts_at_one && fills_range) {
        report.record(
            Rule::Contiguity,
            format!(
                "Task numbering is not contiguous from T1..Tn. Found IDs: {}",
                id_list(&unique)
            ),
        );
    }

    unique
}

/// Cross-checks the document's own `<N> tasks organized into <M> tiers` line
fn check_declared_counts(
    text: &str,
    defined: &BTreeSet<TaskNumber>,
    report: &mut ValidationReport,
) {
    let Some(declared) = document::declared_counts(text) else {
        report.record(
            Rule::MissingCountLine,
            "Missing line '<N> tasks organized into <M> tiers ...'.",
        );
        return;
    };

    let count = defined.len();
    let max = defined
        .last()
        .cloned()
        .unwrap_or_else(|| TaskNumber::from(0u64));
    tracing::debug!(?declared, count, %max, "declared counts");

    // Generators either count distinct tasks or count up to the highest ID
    if declared.tasks != TaskNumber::from(count) && declared.tasks != max {
        report.record(
            Rule::DeclaredTaskCount,
            format!(
                "Declared task count is inconsistent with detected task IDs. \
                 Declared {}, headings {}, max task ID {}.",
                declared.tasks, count, max
            ),
        );
    }

    let tiers = document::tier_numbers(text);
    if !tiers.is_empty() && declared.tiers != TaskNumber::from(tiers.len()) {
        report.record(
            Rule::DeclaredTierCount,
            format!(
                "Declared tier count does not match tier headings. Declared {}, found {} ({}).",
                declared.tiers,
                tiers.len(),
                id_list(&tiers)
            ),
        );
    }
}

/// Formats numbers as `[1, 3, 2]`
fn id_list<'n>(numbers: impl IntoIterator<Item = &'n TaskNumber>) -> String {
    let items: Vec<&str> = numbers.into_iter().map(TaskNumber::as_str).collect();
    format!("[{}]", items.join(", "))
}

fn check_references(
    doc: &TaskDocument<'_>,
    block: &TaskBlock,
    defined: &BTreeSet<TaskNumber>,
    report: &mut ValidationReport,
) {
    let task = &block.number;
    let blocked_by = doc.field(block, BLOCKED_BY_FIELD);
    let blocks = doc.field(block, BLOCKS_FIELD);

    if blocked_by.is_none() {
        report.record(
            Rule::MissingField,
            format!("T{}: missing '{}' field.", task, BLOCKED_BY_FIELD),
        );
    }
    if blocks.is_none() {
        report.record(
            Rule::MissingField,
            format!("T{}: missing '{}' field.", task, BLOCKS_FIELD),
        );
    }

    for reference in document::extract_task_refs(blocked_by) {
        if !defined.contains(&reference) {
            report.record(
                Rule::UnknownReference,
                format!("T{}: Blocked by references unknown task T{}.", task, reference),
            );
        }
        if reference >= *task {
            report.record(
                Rule::BlockedByOrder,
                format!(
                    "T{}: Blocked by must reference earlier tasks only (found T{}).",
                    task, reference
                ),
            );
        }
    }

    for reference in document::extract_task_refs(blocks) {
        if !defined.contains(&reference) {
            report.record(
                Rule::UnknownReference,
                format!("T{}: Blocks references unknown task T{}.", task, reference),
            );
        }
        if reference <= *task {
            report.record(
                Rule::BlocksOrder,
                format!(
                    "T{}: Blocks must reference later tasks only (found T{}).",
                    task, reference
                ),
            );
        }
    }
}
