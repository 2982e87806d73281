//! Core domain types for binsteps.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the
//! application.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

// ============================================================================
// Binary Numerals
// ============================================================================

/// An unsigned binary numeral: a non-empty sequence of `'0'`/`'1'` characters,
/// most-significant bit first, no sign, no prefix.
///
/// Construction validates the character set, so downstream code never has to
/// re-check well-formedness. The inner string is immutable after construction;
/// operations that need padded copies allocate fresh strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Binary(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseBinaryError {
    #[error("binary number must not be empty")]
    Empty,
    #[error("binary number may only contain 0 and 1 (got {0:?})")]
    InvalidDigit(char),
}

impl Binary {
    pub fn new(value: impl Into<String>) -> Result<Self, ParseBinaryError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ParseBinaryError::Empty);
        }
        if let Some(bad) = value.chars().find(|c| *c != '0' && *c != '1') {
            return Err(ParseBinaryError::InvalidDigit(bad));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`: construction rejects empty input, so a `Binary` holds
    /// at least one bit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The numeral with leading zeros removed. All-zero input collapses to `"0"`.
    #[must_use]
    pub fn significant_bits(&self) -> &str {
        let trimmed = self.0.trim_start_matches('0');
        if trimmed.is_empty() { "0" } else { trimmed }
    }

    /// True if every bit is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.bytes().all(|b| b == b'0')
    }

    /// Compare two numerals as arbitrary-precision unsigned magnitudes.
    ///
    /// Leading zeros are ignored, so `"0101"` and `"101"` compare equal. The
    /// comparison is length-then-lexicographic and never converts to a native
    /// integer, so operands longer than any machine word compare correctly.
    #[must_use]
    pub fn cmp_magnitude(&self, other: &Self) -> Ordering {
        let a = self.significant_bits();
        let b = other.significant_bits();
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    }
}

impl TryFrom<String> for Binary {
    type Error = ParseBinaryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Binary {
    type Error = ParseBinaryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Binary> for String {
    fn from(value: Binary) -> Self {
        value.0
    }
}

impl AsRef<str> for Binary {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for Binary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// Operations
// ============================================================================

/// The three operations the engine performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Operation {
    #[default]
    Add,
    Subtract,
    Multiply,
}

impl Operation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Operation::Add => "Binary Addition",
            Operation::Subtract => "Binary Subtraction",
            Operation::Multiply => "Binary Multiplication",
        }
    }

    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '×',
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "add" | "sum" => Some(Operation::Add),
            "sub" | "subtract" => Some(Operation::Subtract),
            "mul" | "multiply" => Some(Operation::Multiply),
            _ => None,
        }
    }
}

/// How subtraction reduces to addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubtractMethod {
    OnesComplement,
    #[default]
    TwosComplement,
}

impl SubtractMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SubtractMethod::OnesComplement => "ones",
            SubtractMethod::TwosComplement => "twos",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            SubtractMethod::OnesComplement => "one's complement",
            SubtractMethod::TwosComplement => "two's complement",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ones" | "ones-complement" | "1" => Some(SubtractMethod::OnesComplement),
            "twos" | "twos-complement" | "2" => Some(SubtractMethod::TwosComplement),
            _ => None,
        }
    }
}

// ============================================================================
// Step Traces
// ============================================================================

/// One pedagogical step of a derivation.
///
/// `title` is a short label and may encode a hierarchical position ("2.3") or
/// a nesting prefix when spliced in from an inner operation. `calculation` is
/// optional preformatted text showing the literal arithmetic; narrative steps
/// leave it empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculation: Option<String>,
}

impl Step {
    #[must_use]
    pub fn narrative(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            calculation: None,
        }
    }

    #[must_use]
    pub fn with_calculation(
        title: impl Into<String>,
        description: impl Into<String>,
        calculation: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            calculation: Some(calculation.into()),
        }
    }

    /// The same step with `prefix` prepended to its title. Used when splicing
    /// an inner operation's trace into a parent trace.
    #[must_use]
    pub fn prefixed(&self, prefix: &str) -> Self {
        Self {
            title: format!("{prefix}{}", self.title),
            description: self.description.clone(),
            calculation: self.calculation.clone(),
        }
    }
}

/// Flatten a step trace into plain text, one block per step.
///
/// This is the structured-to-text bridge the explanation collaborator
/// consumes; it carries title, description, and calculation for every step.
#[must_use]
pub fn flatten_steps(steps: &[Step]) -> String {
    steps
        .iter()
        .map(|step| {
            let calc = step.calculation.as_deref().unwrap_or("");
            format!("{}:\n{}\n{}", step.title, step.description, calc)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ============================================================================
// Results & Errors
// ============================================================================

/// Error conditions reported as data, never as panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum EngineError {
    /// Subtraction's magnitude precondition (`a >= b`) was violated. This is
    /// a deliberate scope limitation of the complement methods.
    #[error("the second number cannot be larger than the first (negative results are unsupported)")]
    UnsupportedNegativeResult,
    /// The one's-complement path expected an end-around carry and none
    /// materialized despite the precondition passing. Defect marker.
    #[error("no final carry was produced, which indicates an unsupported negative result")]
    InternalInconsistency,
}

/// The computed value of an operation, or the tagged error marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Value(Binary),
    Failed(EngineError),
}

impl Outcome {
    #[must_use]
    pub fn value(&self) -> Option<&Binary> {
        match self {
            Outcome::Value(v) => Some(v),
            Outcome::Failed(_) => None,
        }
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// What every engine function returns: the outcome plus the ordered step
/// trace that derives it.
///
/// When `outcome` is [`Outcome::Failed`], `steps` contains exactly one
/// explanatory step and no calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    pub outcome: Outcome,
    pub steps: Vec<Step>,
}

impl OperationResult {
    #[must_use]
    pub fn new(value: Binary, steps: Vec<Step>) -> Self {
        Self {
            outcome: Outcome::Value(value),
            steps,
        }
    }

    /// An error result carrying the single explanatory step.
    #[must_use]
    pub fn failed(error: EngineError, step: Step) -> Self {
        Self {
            outcome: Outcome::Failed(error),
            steps: vec![step],
        }
    }
}
