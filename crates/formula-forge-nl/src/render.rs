//! Formula renderers, one per intent
//!
//! Each renderer turns the operands captured by a pattern into a formula and
//! an explanation. Column operands are validated and uppercased; literal
//! values keep the case the user typed.

use crate::intent::{Intent, ParsedIntent};
use formula_forge_core::reference::{column_distance, column_label, row_distance, row_number};
use formula_forge_core::{Result, TranslateError, Translation};
use lazy_regex::regex;

/// What a renderer produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// A finished formula
    Formula(Translation),
    /// Marker intent: hand the query to the aggregation fallback with the
    /// multi-condition flag forced on
    MultiConditionAggregate,
}

/// Renderer signature stored in each pattern entry
pub type RenderFn = fn(&ParsedIntent) -> Result<Rendered>;

fn formula(formula: String, explanation: String) -> Result<Rendered> {
    Ok(Rendered::Formula(Translation::new(formula, explanation)))
}

/// `=VLOOKUP(cond:cond, source:return, distance, FALSE)`
pub fn vlookup(parsed: &ParsedIntent) -> Result<Rendered> {
    let source = column_label(parsed.capture(0))?;
    let cond = column_label(parsed.capture(1))?;
    let value = parsed.capture(2);
    let ret = column_label(parsed.capture(3))?;
    let distance = column_distance(&source, &ret)?;

    formula(
        format!("=VLOOKUP({cond}:{cond}, {source}:{ret}, {distance}, FALSE)"),
        format!(
            "This formula looks up values in column {cond} that match {value} and returns \
             the corresponding values from column {ret}."
        ),
    )
}

/// `=HLOOKUP(cond:cond, source:return, distance, FALSE)` over row numbers
pub fn hlookup(parsed: &ParsedIntent) -> Result<Rendered> {
    let source = row_number(parsed.capture(0))?;
    let cond = row_number(parsed.capture(1))?;
    let value = parsed.capture(2);
    let ret = row_number(parsed.capture(3))?;
    let distance = row_distance(parsed.capture(0), parsed.capture(3))?;

    formula(
        format!("=HLOOKUP({cond}:{cond}, {source}:{ret}, {distance}, FALSE)"),
        format!(
            "This formula looks up values in row {cond} that match {value} and returns \
             the corresponding values from row {ret}."
        ),
    )
}

/// `=INDEX(ret:ret, MATCH(value, match:match, 0))`
pub fn index_match(parsed: &ParsedIntent) -> Result<Rendered> {
    let ret = column_label(parsed.capture(0))?;
    let matched = column_label(parsed.capture(1))?;
    let value = parsed.capture(2);

    formula(
        format!("=INDEX({ret}:{ret}, MATCH({value}, {matched}:{matched}, 0))"),
        format!(
            "This formula finds {value} in column {matched} and returns the corresponding \
             value from column {ret}."
        ),
    )
}

/// `=CONCATENATE(A:A, B:B, ...)` from a comma / "and" separated list
pub fn concatenate(parsed: &ParsedIntent) -> Result<Rendered> {
    let columns = regex!(r"(?i),\s*|\s+and\s+")
        .split(parsed.capture(0))
        .map(|part| regex!(r"(?i)^columns?\s+").replace(part.trim(), ""))
        .filter(|part| !part.is_empty())
        .map(|part| column_label(&part))
        .collect::<Result<Vec<_>>>()?;

    if columns.is_empty() {
        return Err(TranslateError::UnableToParse);
    }

    let ranges = columns
        .iter()
        .map(|col| format!("{col}:{col}"))
        .collect::<Vec<_>>()
        .join(", ");

    formula(
        format!("=CONCATENATE({ranges})"),
        format!(
            "This formula combines text from columns {}.",
            columns.join(", ")
        ),
    )
}

/// `=IF(col:col="value", "then", "else")`
pub fn if_then(parsed: &ParsedIntent) -> Result<Rendered> {
    let col = column_label(parsed.capture(0))?;
    let value = parsed.capture(1);
    let then = parsed.capture(2);
    let otherwise = parsed.capture(3);

    formula(
        format!("=IF({col}:{col}=\"{value}\", \"{then}\", \"{otherwise}\")"),
        format!(
            "This formula returns \"{then}\" if the value in column {col} equals {value}, \
             otherwise returns \"{otherwise}\"."
        ),
    )
}

/// Chained IF over `(column, value, result)` triples and a final else value
pub fn nested_if(parsed: &ParsedIntent) -> Result<Rendered> {
    let parts = parsed
        .captures
        .iter()
        .enumerate()
        .map(|(i, part)| {
            if i % 3 == 0 && i + 1 < parsed.captures.len() {
                column_label(part)
            } else {
                Ok(part.clone())
            }
        })
        .collect::<Result<Vec<_>>>()?;

    formula(
        build_nested_if(&parts)?,
        "This formula performs multiple conditional checks and returns different values \
         based on the conditions."
            .to_string(),
    )
}

/// Build `=IF(c1:c1="v1", "r1", IF(c2:c2="v2", "r2", "else"))`
///
/// `parts` holds `k >= 1` triples followed by one else value. One `)` is
/// emitted for every opened `IF(`, so `k` triples close with `k` parens.
pub fn build_nested_if(parts: &[String]) -> Result<String> {
    if parts.len() < 4 || parts.len() % 3 != 1 {
        return Err(TranslateError::Internal(format!(
            "nested IF expects condition triples plus an else value, got {} parts",
            parts.len()
        )));
    }

    let (triples, otherwise) = parts.split_at(parts.len() - 1);
    let mut out = String::from("=IF(");
    let mut opened = 0;

    for (i, triple) in triples.chunks(3).enumerate() {
        let (col, value, result) = (&triple[0], &triple[1], &triple[2]);
        if i > 0 {
            out.push_str(", IF(");
        }
        opened += 1;
        out.push_str(&format!("{col}:{col}=\"{value}\", \"{result}\""));
    }

    out.push_str(&format!(", \"{}\"", otherwise[0]));
    out.push_str(&")".repeat(opened));
    Ok(out)
}

/// SUMIFS / COUNTIFS / AVERAGEIFS markers
pub fn multi_condition_marker(_parsed: &ParsedIntent) -> Result<Rendered> {
    Ok(Rendered::MultiConditionAggregate)
}

/// `=ROUND(col:col, decimals)` and the UP / DOWN variants
pub fn round(parsed: &ParsedIntent) -> Result<Rendered> {
    let function = parsed.intent.function_name();
    let col = column_label(parsed.capture(0))?;
    let decimals = parsed.capture(1);

    formula(
        format!("={function}({col}:{col}, {decimals})"),
        format!(
            "This formula rounds the values in column {col} to {decimals} decimal places \
             using {function}."
        ),
    )
}

/// `=FUNC(col:col)` for LEN, TRIM, PROPER, UPPER and LOWER
pub fn single_column(parsed: &ParsedIntent) -> Result<Rendered> {
    let function = parsed.intent.function_name();
    let col = column_label(parsed.capture(0))?;

    formula(
        format!("={function}({col}:{col})"),
        format!("This formula applies the {function} function to values in column {col}."),
    )
}

/// `=LEFT(col:col, count)` / `=RIGHT(col:col, count)`
pub fn left_right(parsed: &ParsedIntent) -> Result<Rendered> {
    let function = parsed.intent.function_name();
    let count = parsed.capture(0);
    let col = column_label(parsed.capture(1))?;
    let side = if parsed.intent == Intent::Left {
        "left"
    } else {
        "right"
    };

    formula(
        format!("={function}({col}:{col}, {count})"),
        format!(
            "This formula extracts {count} characters from the {side} of the text in column {col}."
        ),
    )
}

/// `=MID(col:col, start, length)`
pub fn mid(parsed: &ParsedIntent) -> Result<Rendered> {
    let length = parsed.capture(0);
    let start = parsed.capture(1);
    let col = column_label(parsed.capture(2))?;

    formula(
        format!("=MID({col}:{col}, {start}, {length})"),
        format!(
            "This formula extracts {length} characters starting at position {start} from column {col}."
        ),
    )
}

/// `=SUBSTITUTE(col:col, "old", "new")`
pub fn substitute(parsed: &ParsedIntent) -> Result<Rendered> {
    let old = parsed.capture(0).trim();
    let new = parsed.capture(1).trim();
    let col = column_label(parsed.capture(2))?;

    formula(
        format!("=SUBSTITUTE({col}:{col}, \"{old}\", \"{new}\")"),
        format!(
            "This formula replaces all occurrences of \"{old}\" with \"{new}\" in column {col}."
        ),
    )
}

/// `=AND(a:a="x", b:b="y")`
pub fn and_check(parsed: &ParsedIntent) -> Result<Rendered> {
    let first = column_label(parsed.capture(0))?;
    let first_value = parsed.capture(1);
    let second = column_label(parsed.capture(2))?;
    let second_value = parsed.capture(3);

    formula(
        format!("=AND({first}:{first}=\"{first_value}\", {second}:{second}=\"{second_value}\")"),
        format!(
            "This formula checks if column {first} equals {first_value} and column {second} \
             equals {second_value}, returning TRUE or FALSE."
        ),
    )
}
