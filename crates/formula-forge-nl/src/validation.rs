//! Checks that short-circuit a query before or between translation stages

use crate::operators::OPERATOR_MAP;
use formula_forge_core::{Result, TranslateError};
use lazy_regex::{lazy_regex, Lazy, Regex};

/// Default minimum query length, in characters, after trimming
pub const MIN_QUERY_LEN: usize = 3;

static NAMED_COLUMN: Lazy<Regex> = lazy_regex!(r"(?i)(?:column|kolom) [a-z]");
static RANGE_COLUMN: Lazy<Regex> = lazy_regex!(r"[A-Za-z]:[A-Za-z]");
static FORMULA_CALL: Lazy<Regex> = lazy_regex!(r"(?i)=[a-z]+\(");

/// `column X` followed somewhere later by a comparison phrase
static CONDITION_FRAGMENT: Lazy<Regex> = Lazy::new(|| {
    let mut phrases: Vec<&str> = OPERATOR_MAP.iter().map(|(phrase, _)| *phrase).collect();
    phrases.sort_by_key(|phrase| std::cmp::Reverse(phrase.len()));
    let alternation = phrases
        .iter()
        .map(|phrase| regex::escape(phrase))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"(?i)column [a-z].*?(?:{alternation})");
    Regex::new(&pattern).expect("operator phrases form a valid regex")
});

/// Check length constraints and return the trimmed query
pub fn check_query(query: &str, min_len: usize) -> Result<&str> {
    if query.is_empty() {
        return Err(TranslateError::EmptyQuery);
    }

    let trimmed = query.trim();
    let len = trimmed.chars().count();
    if len < min_len {
        return Err(TranslateError::TooShort { len, min: min_len });
    }

    Ok(trimmed)
}

/// Whether the query names a column in any accepted form
pub fn has_column_reference(query: &str) -> bool {
    NAMED_COLUMN.is_match(query) || RANGE_COLUMN.is_match(query) || FORMULA_CALL.is_match(query)
}

/// Fail with [`TranslateError::NoColumnReference`] unless a column is named
pub fn require_column_reference(query: &str) -> Result<()> {
    if has_column_reference(query) {
        Ok(())
    } else {
        Err(TranslateError::NoColumnReference)
    }
}

/// Fail with [`TranslateError::InvalidConditionFormat`] unless the clause
/// after `where` contains a `column X <operator>` fragment
pub fn require_condition_fragment(clause: &str) -> Result<()> {
    if CONDITION_FRAGMENT.is_match(clause) {
        Ok(())
    } else {
        Err(TranslateError::InvalidConditionFormat)
    }
}
