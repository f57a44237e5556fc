//! Indonesian to English keyword normalization
//!
//! Every entry of [`KEYWORD_MAP`] is applied in order as a global,
//! case-insensitive substring replacement. Entries are not word-bounded and
//! later entries see the output of earlier ones, so `ke` also rewrites the
//! inside of English words ("broken" becomes "broton") and the `ke-` entry
//! can never fire. Callers rely on that exact behavior; keep the order.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

/// Source phrase -> English phrase, in application order
pub const KEYWORD_MAP: &[(&str, &str)] = &[
    ("jumlahkan", "sum"),
    ("rata-rata", "average"),
    ("hitung", "count"),
    ("cari", "lookup"),
    ("horizontal", "horizontal"),
    ("indeks", "index"),
    ("cocok", "match"),
    ("jika", "if"),
    ("dan", "and"),
    ("di mana", "where"),
    ("kolom", "column"),
    ("sel", "cell"),
    ("tabel", "table"),
    ("kembali", "return"),
    ("adalah", "is"),
    ("sama dengan", "equals"),
    ("lebih besar dari", "is greater than"),
    ("lebih kecil dari", "is less than"),
    ("lebih besar atau sama dengan", "is greater than or equal to"),
    ("lebih kecil atau sama dengan", "is less than or equal to"),
    ("tidak sama dengan", "is not"),
    ("nilai", "value"),
    ("dari", "from"),
    ("ke", "to"),
    ("ke-", "th"),
];

static KEYWORD_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    KEYWORD_MAP
        .iter()
        .map(|&(source, target)| {
            let pattern = format!("(?i){}", regex::escape(source));
            // Escaped literals always compile.
            let re = Regex::new(&pattern).expect("escaped keyword is a valid regex");
            (re, target)
        })
        .collect()
});

/// Rewrite Indonesian phrases in `query` to English
///
/// Text outside the replaced phrases keeps its original case.
pub fn normalize(query: &str) -> String {
    let mut text = query.trim().to_string();
    for (re, target) in KEYWORD_RULES.iter() {
        if re.is_match(&text) {
            text = re.replace_all(&text, NoExpand(target)).into_owned();
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_indonesian_sum_query() {
        assert_eq!(
            normalize("Jumlahkan nilai di kolom A di mana kolom B adalah Ya"),
            "sum value di column A where column B is Ya"
        );
    }

    #[test]
    fn test_english_is_left_alone() {
        let query = "Sum values in column A where column B is Yes";
        assert_eq!(normalize(query), query);
    }

    #[test]
    fn test_longer_phrases_lose_to_earlier_short_ones() {
        // "sama dengan" runs before "tidak sama dengan", so the negation is
        // never seen as a whole phrase.
        assert_eq!(
            normalize("hitung sel di kolom C di mana kolom D tidak sama dengan 0"),
            "count cell di column C where column D tidak equals 0"
        );
    }

    #[test]
    fn test_ke_rewrites_inside_words() {
        // Known fragility: substitutions are not word-bounded.
        assert_eq!(normalize("count broken cells"), "count broton cells");
        assert_eq!(normalize("baris ke-3"), "baris to-3");
    }

    #[test]
    fn test_comparison_phrases() {
        assert_eq!(
            normalize("rata-rata kolom C di mana kolom D lebih besar dari 100"),
            "average column C where column D is greater than 100"
        );
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(normalize("  cari nilai  "), "lookup value");
    }
}
