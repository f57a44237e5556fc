//! Built-in query templates
//!
//! A starter query per supported shape, for front ends that offer a
//! pick-list and for `forge templates`.

#[cfg(feature = "serde")]
use serde::Serialize;

/// A titled example query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Template {
    pub title: &'static str,
    pub query: &'static str,
}

const TEMPLATES: &[Template] = &[
    Template {
        title: "Sum with a condition",
        query: "Sum values in column A where column B is Yes",
    },
    Template {
        title: "Sum with several conditions",
        query: "Sum values in column A where column B is Yes and column C is No",
    },
    Template {
        title: "Average above a threshold",
        query: "Average of column C where column D > 100",
    },
    Template {
        title: "Count matching cells",
        query: "Count cells in column E where column F equals Active",
    },
    Template {
        title: "Look up a value",
        query: "Lookup value from column A where column B equals 42 and return column C",
    },
    Template {
        title: "Index and match",
        query: "Find value in column C where column A equals X",
    },
    Template {
        title: "Combine columns",
        query: "Concatenate column A, B, C",
    },
    Template {
        title: "If / then / else",
        query: "If column A is Yes then 1 else 0",
    },
    Template {
        title: "Nested if",
        query: "If column A is x then 1 else if column B is y then 2 else 0",
    },
    Template {
        title: "Round to decimals",
        query: "Round the value in column A to 2 decimal places",
    },
    Template {
        title: "Text length",
        query: "Get the length of text in column A",
    },
    Template {
        title: "Uppercase text",
        query: "Convert to uppercase in column B",
    },
    Template {
        title: "Direct formula",
        query: "=VLOOKUP(B:B, A:C, 3, FALSE)",
    },
    Template {
        title: "Jumlahkan dengan kondisi",
        query: "Jumlahkan nilai di kolom A di mana kolom B adalah Ya",
    },
];

/// All built-in templates, in display order
pub fn templates() -> &'static [Template] {
    TEMPLATES
}

#[cfg(test)]
mod tests {
    use super::*;
    use formula_forge_nl::try_translate;

    #[test]
    fn test_every_template_translates() {
        for template in templates() {
            let result = try_translate(template.query);
            assert!(
                result.is_ok(),
                "template {:?} failed: {:?}",
                template.title,
                result
            );
        }
    }

    #[test]
    fn test_titles_are_unique() {
        let mut titles: Vec<_> = templates().iter().map(|t| t.title).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), templates().len());
    }
}
