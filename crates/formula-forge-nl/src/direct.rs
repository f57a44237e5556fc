//! Pass-through for queries that are already a formula call

use formula_forge_core::Translation;
use lazy_regex::regex_captures;

/// Recognize `=NAME(arg, arg, ...)` and re-emit it with an uppercased
/// function name and `", "`-joined arguments
///
/// Arguments may not contain `)`, so nested calls are not passed through.
pub fn detect(query: &str) -> Option<Translation> {
    let (_, name, args) = regex_captures!(r"(?i)^=([a-z]+)\(([^)]+)\)$", query)?;
    let function = name.to_uppercase();
    let args = args.split(',').map(str::trim).collect::<Vec<_>>().join(", ");

    Some(Translation::new(
        format!("={function}({args})"),
        format!("This is a direct {function} formula with the specified parameters."),
    ))
}
