//! Query to formula pipeline
//!
//! validate -> direct formula -> normalize -> pattern library -> aggregation
//! fallback. Every stage is a pure function of the query and the immutable
//! tables, so one [`Translator`] can serve any number of threads.

use crate::aggregate;
use crate::direct;
use crate::keywords;
use crate::patterns::PatternLibrary;
use crate::render::Rendered;
use crate::validation::{self, MIN_QUERY_LEN};
use formula_forge_core::{Result, TranslateError, Translation};
use once_cell::sync::Lazy;
use tracing::debug;

/// Options for translation
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    /// Minimum trimmed query length, in characters (default: 3)
    pub min_query_len: usize,
    /// Pattern entries in priority order
    pub library: PatternLibrary,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            min_query_len: MIN_QUERY_LEN,
            library: PatternLibrary::standard(),
        }
    }
}

/// Natural-language to formula translator
#[derive(Debug, Clone, Default)]
pub struct Translator {
    options: TranslateOptions,
}

impl Translator {
    /// Create a translator with the built-in pattern library
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a translator with custom options
    pub fn with_options(options: TranslateOptions) -> Self {
        Self { options }
    }

    /// The options in effect
    pub fn options(&self) -> &TranslateOptions {
        &self.options
    }

    /// Translate `query`, folding failures into an error-shaped [`Translation`]
    pub fn translate(&self, query: &str) -> Translation {
        self.try_translate(query).unwrap_or_else(|err| {
            debug!(error = %err, status = err.status(), "query not translated");
            Translation::from(&err)
        })
    }

    /// Translate `query`, returning the failure kind on error
    pub fn try_translate(&self, query: &str) -> Result<Translation> {
        let query = validation::check_query(query, self.options.min_query_len)?;
        validation::require_column_reference(query)?;

        if let Some(translation) = direct::detect(query) {
            debug!("direct formula passed through");
            return Ok(translation);
        }

        let normalized = keywords::normalize(query);

        let Some((entry, parsed)) = self.options.library.find(&normalized) else {
            debug!("no pattern matched, trying aggregation");
            return aggregate::aggregate(&normalized, false);
        };

        debug!(intent = %parsed.intent, captures = ?parsed.captures, "pattern matched");
        match (entry.render)(&parsed)? {
            Rendered::Formula(translation) => Ok(translation),
            Rendered::MultiConditionAggregate => aggregate::aggregate(&normalized, true)
                .map_err(|err| {
                    debug!(intent = %parsed.intent, error = %err, "marker intent left unresolved");
                    TranslateError::UnableToParse
                }),
        }
    }
}

static DEFAULT_TRANSLATOR: Lazy<Translator> = Lazy::new(Translator::new);

/// Translate with the default options
///
/// # Example
/// ```rust
/// use formula_forge_nl::translate;
///
/// let t = translate("Count cells in column E where column F equals Active");
/// assert_eq!(t.formula, "=COUNTIF(F:F, \"Active\")");
/// ```
pub fn translate(query: &str) -> Translation {
    DEFAULT_TRANSLATOR.translate(query)
}

/// Translate with the default options, returning the failure kind on error
pub fn try_translate(query: &str) -> Result<Translation> {
    DEFAULT_TRANSLATOR.try_translate(query)
}
