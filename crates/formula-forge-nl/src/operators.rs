//! Comparison phrases and the criteria tokens they map to

use std::fmt;

/// Comparison operator used in a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Equal,
    GreaterThan,
    LessThan,
    GreaterEqual,
    LessEqual,
    NotEqual,
    Contains,
    BeginsWith,
    EndsWith,
    Exact,
}

impl ComparisonOp {
    /// Token written into the criteria argument
    pub fn token(self) -> &'static str {
        match self {
            ComparisonOp::Equal => "=",
            ComparisonOp::GreaterThan => ">",
            ComparisonOp::LessThan => "<",
            ComparisonOp::GreaterEqual => ">=",
            ComparisonOp::LessEqual => "<=",
            ComparisonOp::NotEqual => "<>",
            ComparisonOp::Contains => "LIKE",
            ComparisonOp::BeginsWith => "BEGINS",
            ComparisonOp::EndsWith => "ENDS",
            ComparisonOp::Exact => "EXACT",
        }
    }

    /// Phrase used when describing the condition in an explanation
    pub fn describe(self) -> &'static str {
        match self {
            ComparisonOp::Equal => "equals",
            ComparisonOp::GreaterThan => "is greater than",
            ComparisonOp::LessThan => "is less than",
            ComparisonOp::GreaterEqual => "is greater than or equal to",
            ComparisonOp::LessEqual => "is less than or equal to",
            ComparisonOp::NotEqual => "is not",
            ComparisonOp::Contains => "contains",
            ComparisonOp::BeginsWith => "starts with",
            ComparisonOp::EndsWith => "ends with",
            ComparisonOp::Exact => "matches",
        }
    }

    /// Render the criteria argument for `value`
    ///
    /// Equality is a quoted literal (`"Yes"`); everything else is the token
    /// glued to the value (`>100`).
    pub fn criteria(self, value: &str) -> String {
        match self {
            ComparisonOp::Equal => format!("\"{value}\""),
            op => format!("{}{value}", op.token()),
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Lowercase comparison phrase -> operator
pub const OPERATOR_MAP: &[(&str, ComparisonOp)] = &[
    ("is", ComparisonOp::Equal),
    ("equals", ComparisonOp::Equal),
    ("is greater than", ComparisonOp::GreaterThan),
    ("is less than", ComparisonOp::LessThan),
    ("is greater than or equal to", ComparisonOp::GreaterEqual),
    ("is less than or equal to", ComparisonOp::LessEqual),
    ("is not", ComparisonOp::NotEqual),
    ("contains", ComparisonOp::Contains),
    ("starts with", ComparisonOp::BeginsWith),
    ("ends with", ComparisonOp::EndsWith),
    ("matches", ComparisonOp::Exact),
    ("=", ComparisonOp::Equal),
    (">", ComparisonOp::GreaterThan),
    ("<", ComparisonOp::LessThan),
    (">=", ComparisonOp::GreaterEqual),
    ("<=", ComparisonOp::LessEqual),
    ("<>", ComparisonOp::NotEqual),
    ("!=", ComparisonOp::NotEqual),
];

/// Longest phrase in [`OPERATOR_MAP`], in words
pub const MAX_OPERATOR_WORDS: usize = 6;

/// Look up a comparison phrase (case-insensitive, single spaces)
pub fn lookup(phrase: &str) -> Option<ComparisonOp> {
    OPERATOR_MAP
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(phrase))
        .map(|&(_, op)| op)
}
