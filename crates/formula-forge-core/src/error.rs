//! Error types for formula-forge

use thiserror::Error;

/// Result type alias using [`TranslateError`]
pub type Result<T> = std::result::Result<T, TranslateError>;

/// Reasons a query could not be turned into a formula
///
/// Every variant except [`TranslateError::Internal`] is a user-facing problem
/// with the query and maps to status 400.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// The query was empty
    #[error("Query is empty")]
    EmptyQuery,

    /// The trimmed query is shorter than the minimum length
    #[error("Query too short: {len} characters (minimum {min})")]
    TooShort { len: usize, min: usize },

    /// No `column X`, `X:X` or `=NAME(` reference anywhere in the query
    #[error("No column references found")]
    NoColumnReference,

    /// Aggregation query without a `where` clause
    #[error("Missing 'where' clause")]
    MissingWhereClause,

    /// The text after `where` has no `column X <operator>` fragment
    #[error("Invalid condition format")]
    InvalidConditionFormat,

    /// SUM / AVERAGE query without the column to aggregate
    #[error("Missing target column for {function}")]
    MissingTargetColumn { function: String },

    /// No condition could be extracted from the `where` clause
    #[error("Invalid criteria")]
    InvalidCriteria,

    /// None of sum / average / count appears in an aggregation query
    #[error("Invalid function keyword")]
    InvalidFunctionKeyword,

    /// A captured column or row operand is not a valid reference
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// Every stage ran without producing a formula
    #[error("Unable to parse query")]
    UnableToParse,

    /// A rendering stage hit a state it should never reach
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TranslateError {
    /// HTTP-equivalent status code for this failure
    pub fn status(&self) -> u16 {
        match self {
            TranslateError::Internal(_) => 500,
            _ => 400,
        }
    }

    /// Short headline placed in the `formula` field (`Error: ...`)
    pub fn headline(&self) -> &'static str {
        match self {
            TranslateError::EmptyQuery => "Error: Invalid query",
            TranslateError::TooShort { .. } => "Error: Query too short",
            TranslateError::NoColumnReference => "Error: No column references found",
            TranslateError::MissingWhereClause => "Error: Missing condition",
            TranslateError::InvalidConditionFormat => "Error: Invalid condition format",
            TranslateError::MissingTargetColumn { .. } => "Error: Missing target column",
            TranslateError::InvalidCriteria => "Error: Invalid criteria",
            TranslateError::InvalidFunctionKeyword => "Error: Invalid function",
            TranslateError::InvalidReference(_) => "Error: Invalid reference",
            TranslateError::UnableToParse => "Error: Unable to parse query",
            TranslateError::Internal(_) => "Error: Server error",
        }
    }

    /// Guidance text for the `explanation` field
    ///
    /// Always quotes at least one example query.
    pub fn guidance(&self) -> String {
        match self {
            TranslateError::EmptyQuery => "Please provide a valid text query to generate a formula.\n\n\
                 Example: \"Sum values in column A where column B is Yes\""
                .to_string(),
            TranslateError::TooShort { .. } => "Please provide a more detailed query. \
                 Example: \"Sum values in column A where column B is Yes\""
                .to_string(),
            TranslateError::NoColumnReference => "Please specify at least one column using \"column X\" format, \
                 where X is a letter, or use direct Excel references like \"A:A\". \
                 Examples: \"Sum values in column A where column B is Yes\" or \
                 \"Jumlahkan nilai di kolom A di mana kolom B adalah Ya\""
                .to_string(),
            TranslateError::MissingWhereClause => "Please include conditions using \"where\" in your query.\n\n\
                 Example: \"Sum values in column A where column B is Yes\""
                .to_string(),
            TranslateError::InvalidConditionFormat => "Please use \"column X is Y\" or \"column X equals Y\" format.\n\n\
                 Example: \"Sum values in column A where column B is Yes\""
                .to_string(),
            TranslateError::MissingTargetColumn { function } => format!(
                "Please specify which column to {function}.\n\n\
                 Example: \"{function} values in column A where column B is Yes\""
            ),
            TranslateError::InvalidCriteria => "Please specify columns and conditions clearly.\n\n\
                 Example formats:\n\
                 - \"Sum values in column A where column B is Yes\"\n\
                 - \"Average of column C where column D > 100\"\n\
                 - \"Count cells in column E where column F equals Active\""
                .to_string(),
            TranslateError::InvalidFunctionKeyword => "Please start your query with one of these functions: SUM, AVERAGE, COUNT.\n\n\
                 Example queries:\n\
                 - \"Sum values in column A where column B is Yes\"\n\
                 - \"Average of column C where column D is greater than 100\"\n\
                 - \"Count cells in column E where column F equals Active\""
                .to_string(),
            TranslateError::InvalidReference(reference) => format!(
                "\"{reference}\" is not a valid column letter or row number.\n\n\
                 Example: \"Lookup value from column A where column B equals 42 and return column C\""
            ),
            TranslateError::UnableToParse => "Please check your query format and try again.\n\n\
                 Example queries:\n\
                 1. \"Sum values in column A where column B is Yes\"\n\
                 2. \"Average of column C where column D > 100\"\n\
                 3. \"Count cells in column E where column F equals Active\"\n\
                 4. \"Get the first 3 characters from column A\"\n\
                 5. \"=CONCATENATE(A:A, B:B, C:C)\"\n\
                 6. \"Jumlahkan nilai di kolom A di mana kolom B adalah Ya\""
                .to_string(),
            TranslateError::Internal(_) => {
                let mut text =
                    String::from("An unexpected error occurred. Please try again.\n\nExample queries:");
                for example in crate::EXAMPLE_QUERIES {
                    text.push_str("\n- \"");
                    text.push_str(example);
                    text.push('"');
                }
                text
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(TranslateError::TooShort { len: 2, min: 3 }.status(), 400);
        assert_eq!(TranslateError::InvalidCriteria.status(), 400);
        assert_eq!(TranslateError::UnableToParse.status(), 400);
        assert_eq!(TranslateError::Internal("boom".into()).status(), 500);
    }

    #[test]
    fn test_every_guidance_quotes_an_example() {
        let errors = [
            TranslateError::EmptyQuery,
            TranslateError::TooShort { len: 1, min: 3 },
            TranslateError::NoColumnReference,
            TranslateError::MissingWhereClause,
            TranslateError::InvalidConditionFormat,
            TranslateError::MissingTargetColumn {
                function: "average".into(),
            },
            TranslateError::InvalidCriteria,
            TranslateError::InvalidFunctionKeyword,
            TranslateError::InvalidReference("7".into()),
            TranslateError::UnableToParse,
            TranslateError::Internal("boom".into()),
        ];

        for error in &errors {
            assert!(error.headline().starts_with(crate::ERROR_PREFIX));
            assert!(
                error.guidance().contains("column A") || error.guidance().contains("kolom A"),
                "{error:?} guidance has no example query"
            );
        }
    }

    #[test]
    fn test_missing_target_column_names_function() {
        let err = TranslateError::MissingTargetColumn {
            function: "sum".into(),
        };
        assert!(err.guidance().starts_with("Please specify which column to sum."));
        assert_eq!(err.to_string(), "Missing target column for sum");
    }
}
