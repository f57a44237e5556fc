//! # formula-forge
//!
//! Translate English and Indonesian natural-language queries into
//! spreadsheet formulas.
//!
//! ## Features
//!
//! - Conditional aggregation (SUMIF / AVERAGEIF / COUNTIF and the `*IFS` forms)
//! - Lookups (VLOOKUP, HLOOKUP, INDEX/MATCH)
//! - IF and nested IF chains, AND checks
//! - Rounding and text functions
//! - Direct `=NAME(args)` formulas pass through
//! - Indonesian keywords are normalized to English first
//!
//! Every query yields a [`Translation`]: a formula starting with `=` on
//! success, or an `Error:` headline plus guidance on failure.
//!
//! ## Example
//!
//! ```rust
//! use formula_forge::prelude::*;
//!
//! let t = translate("Sum values in column A where column B is Yes");
//! assert_eq!(t.formula, "=SUMIF(B:B, \"Yes\", A:A)");
//!
//! let err = try_translate("sum it all").unwrap_err();
//! assert_eq!(err, TranslateError::NoColumnReference);
//! assert_eq!(err.status(), 400);
//! ```

pub mod prelude;
pub mod templates;

pub use templates::{templates, Template};

// Re-export core types
pub use formula_forge_core::{
    reference, Result, TranslateError, Translation, ERROR_PREFIX, EXAMPLE_QUERIES,
};

// Re-export the translator
pub use formula_forge_nl::{
    translate, try_translate, ComparisonOp, Intent, ParsedIntent, PatternEntry, PatternLibrary,
    Rendered, TranslateOptions, Translator,
};

/// Lower-level translation stages
pub mod nl {
    pub use formula_forge_nl::{
        aggregate, direct, intent, keywords, operators, patterns, render, validation,
    };
}
