//! End-to-end translation tests through the public facade

use formula_forge::nl::render::build_nested_if;
use formula_forge::prelude::*;
use formula_forge::reference::column_distance;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::Arc;
use std::thread;

fn formula(query: &str) -> String {
    translate(query).formula
}

/// Indonesian and English phrasing of the same query reach the same formula
#[test]
fn test_indonesian_and_english_agree() {
    let id = translate("Jumlahkan nilai di kolom A di mana kolom B adalah Ya");
    let en = translate("Sum values in column A where column B is Ya");
    assert_eq!(id.formula, "=SUMIF(B:B, \"Ya\", A:A)");
    assert_eq!(id.formula, en.formula);

    assert_eq!(
        formula("Hitung sel di kolom E di mana kolom F sama dengan Aktif"),
        "=COUNTIF(F:F, \"Aktif\")"
    );
}

/// Direct formulas come back unchanged
#[test]
fn test_direct_formula_passthrough() {
    assert_eq!(
        formula("=VLOOKUP(B:B, A:C, 3, FALSE)"),
        "=VLOOKUP(B:B, A:C, 3, FALSE)"
    );
    assert_eq!(formula("=sum(A:A,B:B)"), "=SUM(A:A, B:B)");
}

/// Conditional aggregation
#[test]
fn test_aggregation_formulas() {
    assert_eq!(
        formula("Sum values in column A where column B is Yes"),
        "=SUMIF(B:B, \"Yes\", A:A)"
    );
    assert_eq!(
        formula("Sum values in column A where column B is Yes and column C is No"),
        "=SUMIFS(A:A, B:B, \"Yes\", C:C, \"No\")"
    );
    assert_eq!(
        formula("Count cells in column E where column F equals Active"),
        "=COUNTIF(F:F, \"Active\")"
    );
    assert_eq!(
        formula("Average of column C where column D > 100"),
        "=AVERAGEIF(D:D, >100, C:C)"
    );
}

/// Lookup family
#[test]
fn test_lookups() {
    assert_eq!(
        formula("Lookup value from column A where column B equals 42 and return column C"),
        "=VLOOKUP(B:B, A:C, 3, FALSE)"
    );
    assert_eq!(
        formula("Find value in column C where column A equals X"),
        "=INDEX(C:C, MATCH(X, A:A, 0))"
    );
    assert_eq!(
        formula("Horizontal lookup value from row 1 where row 2 equals 5 and return row 4 in A:F"),
        "=HLOOKUP(2:2, 1:4, 4, FALSE)"
    );
}

/// Column distance is symmetric and inclusive
#[test]
fn test_column_distance() {
    assert_eq!(column_distance("A", "C").unwrap(), 3);
    assert_eq!(column_distance("C", "A").unwrap(), 3);
    assert_eq!(column_distance("B", "B").unwrap(), 1);
}

/// IF and nested IF
#[test]
fn test_if_and_nested_if() {
    assert_eq!(
        formula("If column A is Yes then 1 else 0"),
        "=IF(A:A=\"Yes\", \"1\", \"0\")"
    );
    assert_eq!(
        formula("If column A is x then 1 else if column B is y then 2 else 0"),
        "=IF(A:A=\"x\", \"1\", IF(B:B=\"y\", \"2\", \"0\"))"
    );
}

/// N triples open N-1 nested IFs and close N parens
#[test]
fn test_nested_if_shape() {
    for triples in 1..=5 {
        let mut parts = Vec::new();
        for i in 0..triples {
            parts.push(((b'A' + i as u8) as char).to_string());
            parts.push(format!("v{i}"));
            parts.push(format!("r{i}"));
        }
        parts.push("none".to_string());

        let out = build_nested_if(&parts).unwrap();
        assert_eq!(out.matches(", IF(").count(), triples - 1, "{out}");
        assert_eq!(out.matches(')').count(), triples, "{out}");
        assert!(out.starts_with("=IF(A:A=\"v0\", \"r0\""));
        assert!(out.ends_with(&format!(", \"none\"{}", ")".repeat(triples))));
    }
}

/// A specific pattern beats the aggregation fallback
#[test]
fn test_specific_pattern_wins() {
    assert_eq!(
        formula("Sum and round the value in column A to 2 decimals where column B is Yes"),
        "=ROUND(A:A, 2)"
    );
}

/// Text functions
#[test]
fn test_text_functions() {
    assert_eq!(formula("Get the length of text in column A"), "=LEN(A:A)");
    assert_eq!(formula("Convert to uppercase in column B"), "=UPPER(B:B)");
    assert_eq!(
        formula("Concatenate column A, B, C"),
        "=CONCATENATE(A:A, B:B, C:C)"
    );
    assert_eq!(
        formula("Combine column A and column B"),
        "=CONCATENATE(A:A, B:B)"
    );
    assert_eq!(
        formula("Round the value in column A to 2 decimal places"),
        "=ROUND(A:A, 2)"
    );
}

/// Failures carry an `Error:` headline, guidance and a status
#[test]
fn test_failures() {
    assert_eq!(
        try_translate("ab"),
        Err(TranslateError::TooShort { len: 2, min: 3 })
    );
    assert_eq!(
        try_translate("Sum everything please"),
        Err(TranslateError::NoColumnReference)
    );
    assert_eq!(
        try_translate("Sum values in column A"),
        Err(TranslateError::MissingWhereClause)
    );
    assert_eq!(
        try_translate("Sum values in column 1 where column B is Yes"),
        Err(TranslateError::MissingTargetColumn {
            function: "sum".into()
        })
    );
    assert!(translate("If column A is x then 1 else if foo").is_error());

    let t = translate("Sum values in column A");
    assert!(t.is_error());
    assert!(t.formula.starts_with(formula_forge::ERROR_PREFIX));
    assert!(t.explanation.contains("column A"));
    assert_eq!(TranslateError::MissingWhereClause.status(), 400);
}

/// One translator shared across threads
#[test]
fn test_shared_translator() {
    let translator = Arc::new(Translator::new());
    let handles: Vec<_> = formula_forge::EXAMPLE_QUERIES
        .iter()
        .map(|query| {
            let translator = Arc::clone(&translator);
            thread::spawn(move || (translate(query), translator.translate(query)))
        })
        .collect();

    for handle in handles {
        let (expected, actual) = handle.join().unwrap();
        assert_eq!(expected, actual);
        assert!(!actual.is_error(), "{actual}");
    }
}

proptest! {
    /// Translation is a pure function of the query
    #[test]
    fn prop_idempotent(query in "(?:Sum|Count|Average) (?:values )?in column [A-F] where column [A-F] (?:is|equals|>) [A-Za-z0-9]{1,6}") {
        let first = translate(&query);
        prop_assert_eq!(&first, &translate(&query));
        prop_assert!(first.formula.starts_with('='), "{}", first);
    }
}
