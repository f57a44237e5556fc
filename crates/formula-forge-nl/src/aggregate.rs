//! Conditional aggregation fallback
//!
//! Handles `sum|average|count ... where column X <op> value [and ...]` when no
//! library pattern produced a formula. The clause after `where` is split on
//! ` and ` and every fragment is run through [`ConditionScanner`]; fragments
//! it cannot read are dropped without an error.

use crate::operators::{self, ComparisonOp, MAX_OPERATOR_WORDS};
use crate::validation;
use formula_forge_core::{Result, TranslateError, Translation};
use lazy_regex::{lazy_regex, regex_captures, Lazy, Regex};
use std::fmt;
use tracing::trace;

static WHERE: Lazy<Regex> = lazy_regex!(r"(?i)where");
static AND_SEPARATOR: Lazy<Regex> = lazy_regex!(r"(?i) and ");
static FUNCTION_KEYWORD: Lazy<Regex> = lazy_regex!(r"(?i)\b(sum|average|count)\b");

/// Aggregation named by the query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    Sum,
    Average,
    Count,
}

impl Aggregation {
    /// Lowercase keyword as it appears in queries
    pub fn keyword(self) -> &'static str {
        match self {
            Aggregation::Sum => "sum",
            Aggregation::Average => "average",
            Aggregation::Count => "count",
        }
    }

    /// SUMIF / SUMIFS and friends
    pub fn function_name(self, multi_condition: bool) -> &'static str {
        match (self, multi_condition) {
            (Aggregation::Sum, false) => "SUMIF",
            (Aggregation::Sum, true) => "SUMIFS",
            (Aggregation::Average, false) => "AVERAGEIF",
            (Aggregation::Average, true) => "AVERAGEIFS",
            (Aggregation::Count, false) => "COUNTIF",
            (Aggregation::Count, true) => "COUNTIFS",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "sum" => Some(Aggregation::Sum),
            "average" => Some(Aggregation::Average),
            "count" => Some(Aggregation::Count),
            _ => None,
        }
    }
}

/// One `column X <op> value` filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub column: String,
    pub op: ComparisonOp,
    pub value: String,
}

impl Condition {
    /// Criteria argument for this condition (`"Yes"`, `>100`)
    pub fn criteria(&self) -> String {
        self.op.criteria(&self.value)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "column {} {} {}",
            self.column,
            self.op.describe(),
            self.value
        )
    }
}

#[derive(Debug)]
enum ScanState {
    SeekingColumn,
    SeekingOperator {
        column: String,
        start: usize,
    },
    ConsumingValue {
        column: String,
        op: ComparisonOp,
        start: usize,
    },
}

/// Reads one condition fragment token by token
///
/// States: seeking a `column <letter>` pair, then the longest operator phrase
/// that still leaves a value, then the rest of the fragment as the value.
pub struct ConditionScanner<'a> {
    tokens: Vec<&'a str>,
}

impl<'a> ConditionScanner<'a> {
    pub fn new(fragment: &'a str) -> Self {
        Self {
            tokens: fragment.split_whitespace().collect(),
        }
    }

    /// Run the scanner; `None` when the fragment holds no usable condition
    pub fn scan(&self) -> Option<Condition> {
        let mut state = ScanState::SeekingColumn;
        loop {
            state = match state {
                ScanState::SeekingColumn => {
                    let (column, start) = self.find_column()?;
                    ScanState::SeekingOperator { column, start }
                }
                ScanState::SeekingOperator { column, start } => {
                    let (op, end) = self.longest_operator(start)?;
                    ScanState::ConsumingValue {
                        column,
                        op,
                        start: end,
                    }
                }
                ScanState::ConsumingValue { column, op, start } => {
                    let value = self.tokens[start..]
                        .join(" ")
                        .replace(['"', '\''], "")
                        .trim()
                        .to_string();
                    if value.is_empty() {
                        return None;
                    }
                    return Some(Condition { column, op, value });
                }
            };
        }
    }

    /// Index just past the first `column <letter>` pair
    fn find_column(&self) -> Option<(String, usize)> {
        self.tokens.windows(2).enumerate().find_map(|(i, pair)| {
            let is_letter = pair[1].len() == 1 && pair[1].chars().all(|c| c.is_ascii_alphabetic());
            (pair[0].eq_ignore_ascii_case("column") && is_letter)
                .then(|| (pair[1].to_ascii_uppercase(), i + 2))
        })
    }

    /// Longest operator phrase starting at `start`, and the index after it
    fn longest_operator(&self, start: usize) -> Option<(ComparisonOp, usize)> {
        let mut best = None;
        let limit = self.tokens.len().min(start + MAX_OPERATOR_WORDS);
        for end in start..limit {
            // Leave at least one token for the value.
            if end + 1 >= self.tokens.len() {
                break;
            }
            let phrase = self.tokens[start..=end].join(" ");
            if let Some(op) = operators::lookup(&phrase) {
                best = Some((op, end + 1));
            }
        }
        best
    }
}

/// Parse one fragment of the `where` clause
pub fn parse_condition(fragment: &str) -> Option<Condition> {
    ConditionScanner::new(fragment).scan()
}

/// Build a SUMIF / AVERAGEIF / COUNTIF family formula from `query`
///
/// `force_multi` is set when a multi-condition marker intent handed the
/// query over; it selects the `*IFS` form regardless of condition count.
pub fn aggregate(query: &str, force_multi: bool) -> Result<Translation> {
    let where_match = WHERE
        .find(query)
        .ok_or(TranslateError::MissingWhereClause)?;

    let aggregation = FUNCTION_KEYWORD
        .captures(query)
        .and_then(|caps| Aggregation::from_keyword(&caps[1]))
        .ok_or(TranslateError::InvalidFunctionKeyword)?;

    let multi_flag = force_multi
        || query.to_lowercase().contains("and")
        || WHERE.find_iter(query).count() > 1;

    let before_where = query[..where_match.start()].trim();
    let after_where = query[where_match.end()..].trim();

    validation::require_condition_fragment(after_where)?;

    let target = match aggregation {
        Aggregation::Count => None,
        _ => {
            let (_, column) = regex_captures!(r"(?i)column ([a-z])", before_where).ok_or_else(|| {
                TranslateError::MissingTargetColumn {
                    function: aggregation.keyword().to_string(),
                }
            })?;
            Some(column.to_uppercase())
        }
    };

    let conditions: Vec<Condition> = AND_SEPARATOR
        .split(after_where)
        .filter_map(|fragment| {
            let condition = parse_condition(fragment);
            if condition.is_none() {
                trace!(fragment, "skipping unreadable condition fragment");
            }
            condition
        })
        .collect();

    if conditions.is_empty() {
        return Err(TranslateError::InvalidCriteria);
    }

    let multi_condition = multi_flag || conditions.len() > 1;
    Ok(render(
        aggregation,
        target.as_deref(),
        &conditions,
        multi_condition,
    ))
}

fn render(
    aggregation: Aggregation,
    target: Option<&str>,
    conditions: &[Condition],
    multi_condition: bool,
) -> Translation {
    let function = aggregation.function_name(multi_condition);
    let verb = aggregation.keyword();

    if !multi_condition {
        let condition = &conditions[0];
        let col = &condition.column;
        let criteria = condition.criteria();
        return match target {
            Some(target) => Translation::new(
                format!("={function}({col}:{col}, {criteria}, {target}:{target})"),
                format!(
                    "This formula {verb}s values in column {target} where column {col} {} {}.",
                    condition.op.describe(),
                    condition.value
                ),
            ),
            None => Translation::new(
                format!("={function}({col}:{col}, {criteria})"),
                format!(
                    "This formula counts cells in column {col} where the value {} {}.",
                    condition.op.describe(),
                    condition.value
                ),
            ),
        };
    }

    let mut args = Vec::with_capacity(conditions.len() + 1);
    if let Some(target) = target {
        args.push(format!("{target}:{target}"));
    }
    for condition in conditions {
        let col = &condition.column;
        args.push(format!("{col}:{col}, {}", condition.criteria()));
    }

    let described = conditions
        .iter()
        .map(Condition::to_string)
        .collect::<Vec<_>>()
        .join(" and ");
    let explanation = match target {
        Some(target) => format!(
            "This formula {verb}s values in column {target} where the following conditions \
             are met: {described}."
        ),
        None => format!(
            "This formula counts cells where the following conditions are met: {described}."
        ),
    };

    Translation::new(format!("={function}({})", args.join(", ")), explanation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn condition(column: &str, op: ComparisonOp, value: &str) -> Condition {
        Condition {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    #[test]
    fn test_scanner_simple_equality() {
        assert_eq!(
            parse_condition("column B is Yes"),
            Some(condition("B", ComparisonOp::Equal, "Yes"))
        );
        assert_eq!(
            parse_condition("the column f equals Active"),
            Some(condition("F", ComparisonOp::Equal, "Active"))
        );
    }

    #[test]
    fn test_scanner_prefers_longest_operator() {
        assert_eq!(
            parse_condition("column D is greater than 100"),
            Some(condition("D", ComparisonOp::GreaterThan, "100"))
        );
        assert_eq!(
            parse_condition("column D is greater than or equal to 5"),
            Some(condition("D", ComparisonOp::GreaterEqual, "5"))
        );
        assert_eq!(
            parse_condition("column D is not 0"),
            Some(condition("D", ComparisonOp::NotEqual, "0"))
        );
    }

    #[test]
    fn test_scanner_keeps_a_value() {
        // "is not" would leave nothing, so the shorter "is" wins.
        assert_eq!(
            parse_condition("column D is not"),
            Some(condition("D", ComparisonOp::Equal, "not"))
        );
        assert_eq!(parse_condition("column D is"), None);
    }

    #[test]
    fn test_scanner_strips_quotes_and_joins_words() {
        assert_eq!(
            parse_condition("column C equals \"New York\""),
            Some(condition("C", ComparisonOp::Equal, "New York"))
        );
        assert_eq!(
            parse_condition("column C > '10'"),
            Some(condition("C", ComparisonOp::GreaterThan, "10"))
        );
    }

    #[test]
    fn test_scanner_rejects_unreadable_fragments() {
        assert_eq!(parse_condition("B is Yes"), None);
        assert_eq!(parse_condition("column BB is Yes"), None);
        assert_eq!(parse_condition("column B looks like Yes"), None);
    }

    #[test]
    fn test_sumif_single_condition() {
        let t = aggregate("Sum values in column A where column B is Yes", false).unwrap();
        assert_eq!(t.formula, "=SUMIF(B:B, \"Yes\", A:A)");
        assert_eq!(
            t.explanation,
            "This formula sums values in column A where column B equals Yes."
        );
    }

    #[test]
    fn test_sumifs_multi_condition() {
        let t = aggregate(
            "Sum values in column A where column B is Yes and column C is No",
            false,
        )
        .unwrap();
        assert_eq!(t.formula, "=SUMIFS(A:A, B:B, \"Yes\", C:C, \"No\")");
        assert_eq!(
            t.explanation,
            "This formula sums values in column A where the following conditions are met: \
             column B equals Yes and column C equals No."
        );
    }

    #[test]
    fn test_countif_has_no_target_range() {
        let t = aggregate("Count cells in column E where column F equals Active", false).unwrap();
        assert_eq!(t.formula, "=COUNTIF(F:F, \"Active\")");

        let t = aggregate(
            "Count cells where column F equals Active and column G > 3",
            false,
        )
        .unwrap();
        assert_eq!(t.formula, "=COUNTIFS(F:F, \"Active\", G:G, >3)");
    }

    #[test]
    fn test_averageif_comparison_is_unquoted() {
        let t = aggregate("Average of column C where column D is greater than 100", false).unwrap();
        assert_eq!(t.formula, "=AVERAGEIF(D:D, >100, C:C)");
    }

    #[test]
    fn test_and_substring_sets_multi_flag() {
        // "Brand" contains "and": one condition, but the IFS form.
        let t = aggregate("Sum values in column A where column B is Brand", false).unwrap();
        assert_eq!(t.formula, "=SUMIFS(A:A, B:B, \"Brand\")");
    }

    #[test]
    fn test_forced_multi_flag() {
        let t = aggregate("Sum values in column A where column B is Yes", true).unwrap();
        assert_eq!(t.formula, "=SUMIFS(A:A, B:B, \"Yes\")");
    }

    #[test]
    fn test_unreadable_fragments_are_skipped() {
        let t = aggregate(
            "Sum values in column A where column B is Yes and it is sunny",
            false,
        )
        .unwrap();
        assert_eq!(t.formula, "=SUMIFS(A:A, B:B, \"Yes\")");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            aggregate("Sum values in column A", false),
            Err(TranslateError::MissingWhereClause)
        );
        assert_eq!(
            aggregate("Total of column A where column B is Yes", false),
            Err(TranslateError::InvalidFunctionKeyword)
        );
        assert_eq!(
            aggregate("Sum values in column A where multiple conditions", false),
            Err(TranslateError::InvalidConditionFormat)
        );
        assert_eq!(
            aggregate("Sum everything where column B is Yes", false),
            Err(TranslateError::MissingTargetColumn {
                function: "sum".into()
            })
        );
        assert_eq!(
            aggregate("Sum values in column A where column B is", false),
            Err(TranslateError::InvalidCriteria)
        );
        assert_eq!(
            aggregate("Sum values in column 1 where column B is Yes", false),
            Err(TranslateError::MissingTargetColumn {
                function: "sum".into()
            })
        );
    }
}
