//! Ordered intent pattern library
//!
//! Entries are tried in declaration order against the normalized query and
//! the first one whose matcher succeeds wins. There is no scoring and no
//! second attempt, so the order of [`PatternLibrary::standard`] decides every
//! ambiguous query.

use crate::intent::{Intent, ParsedIntent};
use crate::render::{self, RenderFn};
use lazy_regex::{lazy_regex, Lazy, Regex};
use std::fmt;

/// Matcher signature: captured operands on success
pub type MatchFn = fn(&str) -> Option<Vec<String>>;

/// One named rule: how to recognize an intent and how to render it
#[derive(Clone, Copy)]
pub struct PatternEntry {
    pub intent: Intent,
    pub matcher: MatchFn,
    pub render: RenderFn,
}

impl PatternEntry {
    pub fn new(intent: Intent, matcher: MatchFn, render: RenderFn) -> Self {
        Self {
            intent,
            matcher,
            render,
        }
    }

    /// Run the matcher against `query`
    pub fn parse(&self, query: &str) -> Option<ParsedIntent> {
        (self.matcher)(query).map(|captures| ParsedIntent::new(self.intent, captures))
    }
}

impl fmt::Debug for PatternEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternEntry")
            .field("intent", &self.intent)
            .finish_non_exhaustive()
    }
}

/// Ordered collection of pattern entries
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    entries: Vec<PatternEntry>,
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::standard()
    }
}

impl PatternLibrary {
    /// Create a library from entries in priority order
    pub fn new(entries: Vec<PatternEntry>) -> Self {
        Self { entries }
    }

    /// The built-in library
    pub fn standard() -> Self {
        Self::new(vec![
            PatternEntry::new(Intent::VLookup, |q| captures(&VLOOKUP, q), render::vlookup),
            PatternEntry::new(Intent::HLookup, |q| captures(&HLOOKUP, q), render::hlookup),
            PatternEntry::new(
                Intent::IndexMatch,
                |q| captures(&INDEX_MATCH, q),
                render::index_match,
            ),
            PatternEntry::new(
                Intent::Concatenate,
                |q| captures(&CONCATENATE, q),
                render::concatenate,
            ),
            PatternEntry::new(Intent::If, match_if, render::if_then),
            PatternEntry::new(Intent::NestedIf, match_nested_if, render::nested_if),
            PatternEntry::new(
                Intent::SumIfs,
                |q| captures(&SUMIFS, q),
                render::multi_condition_marker,
            ),
            PatternEntry::new(
                Intent::CountIfs,
                |q| captures(&COUNTIFS, q),
                render::multi_condition_marker,
            ),
            PatternEntry::new(
                Intent::AverageIfs,
                |q| captures(&AVERAGEIFS, q),
                render::multi_condition_marker,
            ),
            PatternEntry::new(Intent::Round, |q| captures(&ROUND, q), render::round),
            PatternEntry::new(Intent::RoundUp, |q| captures(&ROUND_UP, q), render::round),
            PatternEntry::new(Intent::RoundDown, |q| captures(&ROUND_DOWN, q), render::round),
            PatternEntry::new(Intent::Len, |q| captures(&LEN, q), render::single_column),
            PatternEntry::new(Intent::Left, |q| captures(&LEFT, q), render::left_right),
            PatternEntry::new(Intent::Right, |q| captures(&RIGHT, q), render::left_right),
            PatternEntry::new(Intent::Mid, |q| captures(&MID, q), render::mid),
            PatternEntry::new(
                Intent::Substitute,
                |q| captures(&SUBSTITUTE, q),
                render::substitute,
            ),
            PatternEntry::new(Intent::Trim, |q| captures(&TRIM, q), render::single_column),
            PatternEntry::new(Intent::Proper, |q| captures(&PROPER, q), render::single_column),
            PatternEntry::new(Intent::Upper, |q| captures(&UPPER, q), render::single_column),
            PatternEntry::new(Intent::Lower, |q| captures(&LOWER, q), render::single_column),
            PatternEntry::new(Intent::AndCheck, |q| captures(&AND_CHECK, q), render::and_check),
        ])
    }

    /// Entries in priority order
    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    /// Intents in priority order
    pub fn intents(&self) -> Vec<Intent> {
        self.entries.iter().map(|entry| entry.intent).collect()
    }

    /// Drop every entry for `intent`
    pub fn without(mut self, intent: Intent) -> Self {
        self.entries.retain(|entry| entry.intent != intent);
        self
    }

    /// First entry matching `query`, with its captures
    pub fn find(&self, query: &str) -> Option<(&PatternEntry, ParsedIntent)> {
        self.entries
            .iter()
            .find_map(|entry| entry.parse(query).map(|parsed| (entry, parsed)))
    }
}

/// Participating capture groups of the leftmost match, in group order
fn captures(re: &Regex, query: &str) -> Option<Vec<String>> {
    let caps = re.captures(query)?;
    Some(
        caps.iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str().to_string())
            .collect(),
    )
}

static VLOOKUP: Lazy<Regex> = lazy_regex!(
    r"(?i)(?:find|lookup|search for|get) (?:value|data|item) (?:from|in) (?:column )?(\w+)(?: where| with| having)? (?:column )?(\w+)(?: equals| is| matches) ([\w\d]+)(?: and return| returning| from| in) (?:column )?(\w+)"
);

static HLOOKUP: Lazy<Regex> = lazy_regex!(
    r"(?i)horizontal (?:find|lookup|search for|get) (?:value|data|item) (?:from|in) (?:row )?(\w+)(?: where| with| having)? (?:row )?(\w+)(?: equals| is| matches) ([\w\d]+)(?: and return| returning| from| in) (?:row )?(\w+)"
);

static INDEX_MATCH: Lazy<Regex> = lazy_regex!(
    r"(?i)(?:find|get|lookup|search for) (?:value|data|item) (?:from|in) (?:column )?(\w+)(?: where| with| having)? (?:column )?(\w+)(?: equals| is| matches) ([\w\d]+)"
);

static CONCATENATE: Lazy<Regex> = lazy_regex!(
    r"(?i)(?:combine|concatenate|join|merge)(?: text| values)?(?: from)?(?: columns?)? ((?:(?:column )?\w+(?:,\s*|\s+and\s+))*(?:column )?\w+)"
);

static IF_THEN: Lazy<Regex> = lazy_regex!(
    r"(?i)if (?:column )?(\w+)(?: is| equals) ([\w\d]+) then ([\w\d]+)(?: else| otherwise) ([\w\d]+)"
);

static NESTED_IF: Lazy<Regex> = lazy_regex!(
    r"(?i)if (?:column )?(\w+)(?: is| equals) ([\w\d]+) then ([\w\d]+)((?: else if (?:column )?\w+(?: is| equals) [\w\d]+ then [\w\d]+)*)(?: else| otherwise) ([\w\d]+)"
);

static ELSE_IF_CLAUSE: Lazy<Regex> = lazy_regex!(
    r"(?i) else if (?:column )?(\w+)(?: is| equals) ([\w\d]+) then ([\w\d]+)"
);

static SUMIFS: Lazy<Regex> = lazy_regex!(
    r"(?i)sum (?:values|numbers) (?:from|in) (?:column )?(\w+)(?: where| with| having) multiple conditions"
);

static COUNTIFS: Lazy<Regex> =
    lazy_regex!(r"(?i)count (?:values|numbers|cells) (?:where|with|having) multiple conditions");

static AVERAGEIFS: Lazy<Regex> = lazy_regex!(
    r"(?i)average (?:values|numbers) (?:from|in) (?:column )?(\w+)(?: where| with| having) multiple conditions"
);

static ROUND: Lazy<Regex> = lazy_regex!(
    r"(?i)round(?: the)?(?: value| number)?(?: in)?(?: column)? (\w+)(?: to) (\d+)(?: decimal| decimals| decimal places| decimal point)"
);

static ROUND_UP: Lazy<Regex> = lazy_regex!(
    r"(?i)round(?: the)?(?: value| number)?(?: in)?(?: column)? (\w+)(?: up)(?: to) (\d+)(?: decimal| decimals| decimal places| decimal point)"
);

static ROUND_DOWN: Lazy<Regex> = lazy_regex!(
    r"(?i)round(?: the)?(?: value| number)?(?: in)?(?: column)? (\w+)(?: down)(?: to) (\d+)(?: decimal| decimals| decimal places| decimal point)"
);

static LEN: Lazy<Regex> = lazy_regex!(
    r"(?i)(?:get |find |calculate )?(?:the )?length of(?: text| string| value)(?: in)?(?: column)? (\w+)"
);

static LEFT: Lazy<Regex> =
    lazy_regex!(r"(?i)get(?: the)? first (\d+) characters?(?: from)(?: column)? (\w+)");

static RIGHT: Lazy<Regex> =
    lazy_regex!(r"(?i)get(?: the)? last (\d+) characters?(?: from)(?: column)? (\w+)");

static MID: Lazy<Regex> = lazy_regex!(
    r"(?i)get(?: the)? (\d+) characters? starting (?:from|at) position (\d+)(?: from)(?: column)? (\w+)"
);

static SUBSTITUTE: Lazy<Regex> = lazy_regex!(
    r"(?i)replace(?: all)?(?: occurrences of)? ([\w\s]+)(?: with| by) ([\w\s]+)(?: in)(?: column)? (\w+)"
);

static TRIM: Lazy<Regex> =
    lazy_regex!(r"(?i)(?:remove|trim)(?: all)? spaces(?: from)(?: column)? (\w+)");

static PROPER: Lazy<Regex> =
    lazy_regex!(r"(?i)capitalize(?: each)?(?: word)(?: in)(?: column)? (\w+)");

static UPPER: Lazy<Regex> = lazy_regex!(r"(?i)convert(?: to)? uppercase(?: in)(?: column)? (\w+)");

static LOWER: Lazy<Regex> = lazy_regex!(r"(?i)convert(?: to)? lowercase(?: in)(?: column)? (\w+)");

static AND_CHECK: Lazy<Regex> =
    lazy_regex!(r"(?i)if column (\w) equals (\w+) and column (\w) equals (\w+)");

/// Plain IF; an `else if` chain would otherwise match with `if` as the
/// else value, so those are left for the nested IF entry
fn match_if(query: &str) -> Option<Vec<String>> {
    let parts = captures(&IF_THEN, query)?;
    match parts.last() {
        Some(otherwise) if otherwise.eq_ignore_ascii_case("if") => None,
        _ => Some(parts),
    }
}

/// Nested IF: every `else if` clause contributes a triple, then the else value
fn match_nested_if(query: &str) -> Option<Vec<String>> {
    let caps = NESTED_IF.captures(query)?;
    let mut parts: Vec<String> = (1..=3)
        .filter_map(|i| caps.get(i))
        .map(|m| m.as_str().to_string())
        .collect();

    if let Some(chain) = caps.get(4) {
        for clause in ELSE_IF_CLAUSE.captures_iter(chain.as_str()) {
            parts.extend(
                clause
                    .iter()
                    .skip(1)
                    .flatten()
                    .map(|m| m.as_str().to_string()),
            );
        }
    }

    let otherwise = caps.get(5)?.as_str();
    if otherwise.eq_ignore_ascii_case("if") {
        return None;
    }
    parts.push(otherwise.to_string());
    Some(parts)
}
