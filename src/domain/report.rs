//! Violation classification and aggregation
//!
//! Every check reports through [`ValidationReport::record`], which routes the
//! message to `errors` or `warnings` based on the rule and the run's [`Mode`].

use std::fmt;

use serde::Serialize;

/// Severity policy for a validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Advisory rules become warnings
    #[default]
    Relaxed,
    /// Advisory rules become errors
    Strict,
}

impl Mode {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Mode::Strict
        } else {
            Mode::Relaxed
        }
    }

    pub fn is_strict(self) -> bool {
        self == Mode::Strict
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Relaxed => "relaxed",
            Mode::Strict => "strict",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// The check that produced a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Title,
    MissingSection,
    MissingCountLine,
    NoTaskHeadings,
    DuplicateTaskIds,
    HeadingOrder,
    Contiguity,
    DeclaredTaskCount,
    DeclaredTierCount,
    MissingField,
    UnknownReference,
    BlockedByOrder,
    BlocksOrder,
}

impl Rule {
    /// Advisory rules cover presentation and self-reported bookkeeping.
    /// Anything that changes the meaning of the graph is never advisory.
    pub fn is_advisory(self) -> bool {
        matches!(
            self,
            Rule::HeadingOrder
                | Rule::Contiguity
                | Rule::DeclaredTaskCount
                | Rule::DeclaredTierCount
        )
    }

    /// Severity of this rule under `mode`
    pub fn severity(self, mode: Mode) -> Severity {
        if self.is_advisory() && !mode.is_strict() {
            Severity::Warning
        } else {
            Severity::Error
        }
    }
}

/// One detected defect
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub rule: Rule,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Errors and warnings accumulated over one run, in detection order
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    mode: Mode,
    errors: Vec<Violation>,
    warnings: Vec<Violation>,
}

impl ValidationReport {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Appends a violation to the list its rule maps to under this run's mode
    pub fn record(&mut self, rule: Rule, message: impl Into<String>) {
        let violation = Violation {
            rule,
            message: message.into(),
        };

        tracing::debug!(?rule, message = %violation.message, "violation");

        match rule.severity(self.mode) {
            Severity::Error => self.errors.push(violation),
            Severity::Warning => self.warnings.push(violation),
        }
    }

    pub fn errors(&self) -> &[Violation] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Violation] {
        &self.warnings
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// No errors. Warnings are permitted.
    pub fn is_ok(&self) -> bool {
        !self.has_errors()
    }

    /// Plain messages as `(errors, warnings)`
    pub fn messages(&self) -> (Vec<String>, Vec<String>) {
        let collect = |list: &[Violation]| -> Vec<String> {
            list.iter().map(|v| v.message.clone()).collect()
        };
        (collect(&self.errors), collect(&self.warnings))
    }
}
