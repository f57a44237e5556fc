//! # formula-forge-nl
//!
//! Natural-language query to spreadsheet formula translation.
//!
//! A query passes through these stages, stopping at the first that produces
//! a result:
//!
//! 1. **Validation** - length and column-reference checks ([`validation`])
//! 2. **Direct formulas** - `=NAME(args)` passes through ([`direct`])
//! 3. **Normalization** - Indonesian keywords become English ([`keywords`])
//! 4. **Pattern library** - ordered intent patterns ([`patterns`], [`render`])
//! 5. **Aggregation** - SUMIF / AVERAGEIF / COUNTIF family ([`aggregate`])
//!
//! ## Example
//!
//! ```rust
//! use formula_forge_nl::Translator;
//!
//! let translator = Translator::new();
//! let t = translator.translate("Jumlahkan nilai di kolom A di mana kolom B adalah Ya");
//! assert_eq!(t.formula, "=SUMIF(B:B, \"Ya\", A:A)");
//! ```

pub mod aggregate;
pub mod direct;
pub mod intent;
pub mod keywords;
pub mod operators;
pub mod patterns;
pub mod render;
pub mod translator;
pub mod validation;

pub use aggregate::{Aggregation, Condition};
pub use intent::{Intent, ParsedIntent};
pub use operators::ComparisonOp;
pub use patterns::{PatternEntry, PatternLibrary};
pub use render::Rendered;
pub use translator::{translate, try_translate, TranslateOptions, Translator};
