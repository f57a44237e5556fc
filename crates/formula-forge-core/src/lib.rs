//! # formula-forge-core
//!
//! Core data types shared by the formula-forge crates.
//!
//! This crate provides:
//! - [`Translation`] - The `{formula, explanation}` pair every query produces
//! - [`TranslateError`] - The failure taxonomy, with status codes and guidance text
//! - [`reference`] - Column letter / row number helpers used by the renderers
//!
//! ## Example
//!
//! ```rust
//! use formula_forge_core::{Translation, TranslateError};
//!
//! let ok = Translation::new("=LEN(A:A)", "Counts characters.");
//! assert!(!ok.is_error());
//!
//! let err = Translation::from(&TranslateError::NoColumnReference);
//! assert!(err.formula.starts_with("Error:"));
//! ```

pub mod error;
pub mod reference;
pub mod translation;

pub use error::{Result, TranslateError};
pub use reference::{column_distance, column_index, column_label, row_distance, row_number};
pub use translation::Translation;

/// Prefix carried by the `formula` field of every error-shaped [`Translation`]
pub const ERROR_PREFIX: &str = "Error:";

/// Example queries quoted in error guidance
pub const EXAMPLE_QUERIES: &[&str] = &[
    "Sum values in column A where column B is Yes",
    "Average of column C where column D > 100",
    "Count cells in column E where column F equals Active",
    "=VLOOKUP(B:B, A:C, 3, FALSE)",
    "Jumlahkan nilai di kolom A di mana kolom B adalah Ya",
];
