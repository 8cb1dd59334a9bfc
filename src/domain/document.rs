//! Text scanning for task documents
//!
//! A task document is plain markdown with a loose structure:
//!
//! ```text
//! # Checkout Flow - Implementation Tasks
//!
//! 3 tasks organized into 2 tiers
//!
//! ## Dependency Graph
//! ## TIER 1 - Foundation
//! ### T1: Create schema
//! | Blocked by | None |
//! | Blocks     | T2, T3 |
//! ...
//! ## Summary
//! ```
//!
//! Everything here reads spans of an immutable buffer. Nothing is
//! materialized up front except the task block offsets.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

static TASK_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^### T(\d+):").expect("task heading pattern"));

static TIER_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^## TIER[ \t]+(\d+)[ \t]+-[ \t]+").expect("tier heading pattern")
});

static COUNT_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(\d+)[ \t]+tasks[ \t]+organized[ \t]+into[ \t]+(\d+)[ \t]+tiers")
        .expect("count line pattern")
});

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^#[ \t]+.+[ \t]+-[ \t]+Implementation Tasks[ \t]*\r?$")
        .expect("title pattern")
});

/// Two-column table row: `| name | value |`. The value is lazy so trailing
/// padding before the closing pipe is not captured.
static FIELD_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\|[ \t]*([^|\r\n]*?)[ \t]*\|[ \t]*(.*?)[ \t]*\|[ \t]*\r?$")
        .expect("field row pattern")
});

static TASK_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"T(\d+)").expect("task reference pattern"));

/// A task or tier number as written, of any length.
///
/// Stored as canonical decimal digits (leading zeros dropped) and ordered
/// numerically, so `T007` is task 7 and no digit run is too large to compare.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskNumber(String);

impl TaskNumber {
    /// Builds a number from an ASCII digit run
    pub fn from_digits(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Self("0".to_string())
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for TaskNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for TaskNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<u64> for TaskNumber {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl From<usize> for TaskNumber {
    fn from(n: usize) -> Self {
        Self(n.to_string())
    }
}

impl PartialEq<u64> for TaskNumber {
    fn eq(&self, other: &u64) -> bool {
        self.0 == other.to_string()
    }
}

impl fmt::Display for TaskNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Offsets of one task heading through to the next heading (or end of text)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBlock {
    /// Number parsed from `### T<number>:`. Not guaranteed unique.
    pub number: TaskNumber,
    pub start: usize,
    pub end: usize,
}

impl TaskBlock {
    /// Byte range of the block in the source text
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// The self-reported `<N> tasks organized into <M> tiers` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredCounts {
    pub tasks: TaskNumber,
    pub tiers: TaskNumber,
}

/// A document together with its task blocks
#[derive(Debug)]
pub struct TaskDocument<'a> {
    text: &'a str,
    blocks: Vec<TaskBlock>,
}

impl<'a> TaskDocument<'a> {
    /// Scans `text` for task headings
    pub fn parse(text: &'a str) -> Self {
        Self {
            text,
            blocks: extract_task_blocks(text),
        }
    }

    /// Task blocks in document order
    pub fn blocks(&self) -> &[TaskBlock] {
        &self.blocks
    }

    /// Returns the text belonging to a block
    pub fn block_text(&self, block: &TaskBlock) -> &'a str {
        &self.text[block.span()]
    }

    /// Task numbers in document order, repeats included
    pub fn task_numbers(&self) -> Vec<TaskNumber> {
        self.blocks.iter().map(|b| b.number.clone()).collect()
    }

    /// Looks up a field inside a block
    pub fn field(&self, block: &TaskBlock, name: &str) -> Option<&'a str> {
        extract_field(self.block_text(block), name)
    }
}

/// Partitions text into task blocks, one per `### T<n>:` heading.
///
/// Each block ends where the next heading starts, the last one at the end
/// of the text. Returns an empty vector if there are no headings.
pub fn extract_task_blocks(text: &str) -> Vec<TaskBlock> {
    let headings: Vec<(usize, TaskNumber)> = TASK_HEADING_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let start = caps.get(0)?.start();
            Some((start, TaskNumber::from_digits(&caps[1])))
        })
        .collect();

    headings
        .iter()
        .enumerate()
        .map(|(i, (start, number))| {
            let end = headings.get(i + 1).map_or(text.len(), |(next, _)| *next);
            TaskBlock {
                number: number.clone(),
                start: *start,
                end,
            }
        })
        .collect()
}

/// Finds the `| <name> | <value> |` row in `text` and returns the trimmed value.
///
/// The name comparison ignores ASCII case and surrounding whitespace.
/// Returns `None` when no row matches, which is distinct from an empty value.
pub fn extract_field<'t>(text: &'t str, name: &str) -> Option<&'t str> {
    let name = name.trim();
    FIELD_ROW_RE
        .captures_iter(text)
        .find(|caps| caps[1].trim().eq_ignore_ascii_case(name))
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().trim())
}

/// Extracts every `T<digits>` reference, left to right, repeats included
pub fn extract_task_refs(value: Option<&str>) -> Vec<TaskNumber> {
    let Some(value) = value else {
        return Vec::new();
    };

    TASK_REF_RE
        .captures_iter(value)
        .map(|caps| TaskNumber::from_digits(&caps[1]))
        .collect()
}

/// True if a `# <Feature> - Implementation Tasks` title line exists
pub fn has_title(text: &str) -> bool {
    TITLE_RE.is_match(text)
}

/// True if some line is exactly `## <name>` (trailing whitespace ignored)
pub fn has_section(text: &str, name: &str) -> bool {
    text.lines().any(|line| {
        line.trim_end()
            .strip_prefix("## ")
            .is_some_and(|heading| heading == name)
    })
}

/// Parses the first `<N> tasks organized into <M> tiers` line
pub fn declared_counts(text: &str) -> Option<DeclaredCounts> {
    let caps = COUNT_LINE_RE.captures(text)?;
    Some(DeclaredCounts {
        tasks: TaskNumber::from_digits(&caps[1]),
        tiers: TaskNumber::from_digits(&caps[2]),
    })
}

/// Distinct tier numbers from `## TIER <n> - ` headings, ascending
pub fn tier_numbers(text: &str) -> BTreeSet<TaskNumber> {
    TIER_HEADING_RE
        .captures_iter(text)
        .map(|caps| TaskNumber::from_digits(&caps[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
# Demo - Implementation Tasks

### T1: First
| Blocked by | None |
| Blocks | T2 |

### T2: Second
| Blocked by | T1 |
| Blocks | None |
";

    #[test]
    fn blocks_partition_text() {
        let blocks = extract_task_blocks(DOC);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].number, 1);
        assert_eq!(blocks[1].number, 2);

        assert_eq!(blocks[0].end, blocks[1].start);
        assert_eq!(blocks[1].end, DOC.len());
        assert!(DOC[blocks[0].span()].starts_with("### T1:"));
        assert!(DOC[blocks[1].span()].starts_with("### T2:"));
    }

    #[test]
    fn no_headings_yields_empty() {
        assert!(extract_task_blocks("# Title\n\nNo tasks here.\n").is_empty());
        assert!(extract_task_blocks("").is_empty());
    }

    #[test]
    fn heading_must_start_line_and_have_colon() {
        let text = "  ### T1: indented\n### T2 no colon\n#### T3: too deep\n### T4: ok\n";
        let numbers: Vec<_> = extract_task_blocks(text)
            .into_iter()
            .map(|b| b.number)
            .collect();
        assert_eq!(numbers, vec![4]);
    }

    #[test]
    fn duplicate_headings_are_kept() {
        let text = "### T3: a\n### T3: b\n";
        let doc = TaskDocument::parse(text);
        assert_eq!(doc.task_numbers(), vec![3, 3]);
    }

    #[test]
    fn field_lookup_is_scoped_to_block() {
        let doc = TaskDocument::parse(DOC);
        let blocks = doc.blocks();

        assert_eq!(doc.field(&blocks[0], "Blocks"), Some("T2"));
        assert_eq!(doc.field(&blocks[1], "Blocks"), Some("None"));
        assert_eq!(doc.field(&blocks[1], "Blocked by"), Some("T1"));
    }

    #[test]
    fn field_name_ignores_case_and_padding() {
        let text = "|   blocked BY   |   T1, T2   |\n";
        assert_eq!(extract_field(text, "Blocked by"), Some("T1, T2"));
    }

    #[test]
    fn missing_field_is_none_not_empty() {
        assert_eq!(extract_field("| Blocks | T2 |\n", "Blocked by"), None);
        assert_eq!(extract_field("| Blocked by |  |\n", "Blocked by"), Some(""));
    }

    #[test]
    fn blocks_field_does_not_match_blocked_by_row() {
        let text = "| Blocked by | T1 |\n";
        assert_eq!(extract_field(text, "Blocks"), None);
    }

    #[test]
    fn field_with_crlf_line_endings() {
        let text = "| Blocks | T4 |\r\n| Blocked by | T1 |\r\n";
        assert_eq!(extract_field(text, "Blocks"), Some("T4"));
        assert_eq!(extract_field(text, "Blocked by"), Some("T1"));
    }

    #[test]
    fn refs_preserve_order_and_repeats() {
        assert_eq!(extract_task_refs(Some("T3, T1 and again T3")), vec![3, 1, 3]);
        assert!(extract_task_refs(Some("None")).is_empty());
        assert!(extract_task_refs(None).is_empty());
    }

    #[test]
    fn refs_beyond_machine_width_are_kept() {
        let refs = extract_task_refs(Some("T99999999999, T123456789012345678901234567890"));
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0], 99_999_999_999);
        assert_eq!(refs[1].as_str(), "123456789012345678901234567890");
    }

    #[test]
    fn task_numbers_order_numerically() {
        assert_eq!(TaskNumber::from_digits("007"), 7);
        assert_eq!(TaskNumber::from_digits("000"), 0);
        assert!(TaskNumber::from_digits("9") < TaskNumber::from_digits("10"));
        assert!(TaskNumber::from(u64::MAX) < TaskNumber::from_digits("18446744073709551616"));
        assert_eq!(TaskNumber::from_digits("0042").to_string(), "42");
    }

    #[test]
    fn huge_heading_starts_its_own_block() {
        let text = "### T1: a\nbody\n### T4294967296: b\n";
        let blocks = extract_task_blocks(text);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].number, 4_294_967_296);
        assert!(text[blocks[0].span()].ends_with("body\n"));
    }

    #[test]
    fn title_detection() {
        assert!(has_title(DOC));
        assert!(!has_title("# Demo Implementation Tasks\n"));
        assert!(!has_title("## Demo - Implementation Tasks\n"));
        assert!(!has_title("# Demo - Implementation Tasks and more\n"));
    }

    #[test]
    fn section_must_be_whole_line() {
        assert!(has_section("intro\n## Summary\n", "Summary"));
        assert!(has_section("## Summary   \n", "Summary"));
        assert!(!has_section("## Summary of work\n", "Summary"));
        assert!(!has_section("### Summary\n", "Summary"));
    }

    #[test]
    fn declared_counts_line() {
        let counts = declared_counts("intro\n12 tasks organized into 4 tiers for delivery\n");
        let counts = counts.unwrap();
        assert_eq!(counts.tasks, 12);
        assert_eq!(counts.tiers, 4);
        assert_eq!(declared_counts("We have 12 tasks organized into 4 tiers\n"), None);
    }

    #[test]
    fn huge_declared_count_is_still_a_count_line() {
        let counts = declared_counts("99999999999 tasks organized into 1 tiers\n").unwrap();
        assert_eq!(counts.tasks, 99_999_999_999);
        assert_eq!(counts.tiers, 1);
    }

    #[test]
    fn tier_numbers_are_distinct() {
        let text = "## TIER 1 - Base\n## TIER 2 - Core\n## TIER 2 - Core again\n## TIER3 - bad\n";
        let tiers: Vec<_> = tier_numbers(text).into_iter().collect();
        assert_eq!(tiers, vec![1, 2]);
    }
}
