//! The `{formula, explanation}` output of a translation

use crate::error::TranslateError;
use crate::ERROR_PREFIX;
use std::fmt;

/// A rendered formula and the sentence explaining it
///
/// Failures use the same shape: `formula` holds an `Error: ...` headline and
/// `explanation` holds guidance with example queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Translation {
    /// Spreadsheet formula, starting with `=` on success
    pub formula: String,
    /// Human-readable description of what the formula does
    pub explanation: String,
}

impl Translation {
    /// Create a translation from a formula and its explanation
    pub fn new(formula: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            formula: formula.into(),
            explanation: explanation.into(),
        }
    }

    /// Whether this is an error-shaped translation
    pub fn is_error(&self) -> bool {
        self.formula.starts_with(ERROR_PREFIX)
    }
}

impl From<&TranslateError> for Translation {
    fn from(error: &TranslateError) -> Self {
        Self::new(error.headline(), error.guidance())
    }
}

impl From<TranslateError> for Translation {
    fn from(error: TranslateError) -> Self {
        Self::from(&error)
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.formula, self.explanation)
    }
}
