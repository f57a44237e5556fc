//! Prelude module - common imports for formula-forge users
//!
//! ```rust
//! use formula_forge::prelude::*;
//! ```

pub use crate::{
    // Entry points
    translate,
    try_translate,
    // Pattern library
    Intent,
    PatternEntry,
    PatternLibrary,
    // Error types
    Result,
    // Templates
    templates,
    Template,
    TranslateError,
    TranslateOptions,
    // Main types
    Translation,
    Translator,
};
