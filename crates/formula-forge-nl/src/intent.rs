//! Recognized intents and the operands captured for them

use std::fmt;

/// One category of spreadsheet operation the pattern library recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    VLookup,
    HLookup,
    IndexMatch,
    Concatenate,
    If,
    NestedIf,
    SumIfs,
    CountIfs,
    AverageIfs,
    Round,
    RoundUp,
    RoundDown,
    Len,
    Left,
    Right,
    Mid,
    Substitute,
    Trim,
    Proper,
    Upper,
    Lower,
    AndCheck,
}

impl Intent {
    /// Snake-case intent name
    pub fn name(self) -> &'static str {
        match self {
            Intent::VLookup => "vlookup",
            Intent::HLookup => "hlookup",
            Intent::IndexMatch => "index_match",
            Intent::Concatenate => "concatenate",
            Intent::If => "if",
            Intent::NestedIf => "nested_if",
            Intent::SumIfs => "sumifs",
            Intent::CountIfs => "countifs",
            Intent::AverageIfs => "averageifs",
            Intent::Round => "round",
            Intent::RoundUp => "roundup",
            Intent::RoundDown => "rounddown",
            Intent::Len => "len",
            Intent::Left => "left",
            Intent::Right => "right",
            Intent::Mid => "mid",
            Intent::Substitute => "substitute",
            Intent::Trim => "trim",
            Intent::Proper => "proper",
            Intent::Upper => "upper",
            Intent::Lower => "lower",
            Intent::AndCheck => "and_check",
        }
    }

    /// Outermost spreadsheet function the intent renders
    pub fn function_name(self) -> &'static str {
        match self {
            Intent::VLookup => "VLOOKUP",
            Intent::HLookup => "HLOOKUP",
            Intent::IndexMatch => "INDEX",
            Intent::Concatenate => "CONCATENATE",
            Intent::If | Intent::NestedIf => "IF",
            Intent::SumIfs => "SUMIFS",
            Intent::CountIfs => "COUNTIFS",
            Intent::AverageIfs => "AVERAGEIFS",
            Intent::Round => "ROUND",
            Intent::RoundUp => "ROUNDUP",
            Intent::RoundDown => "ROUNDDOWN",
            Intent::Len => "LEN",
            Intent::Left => "LEFT",
            Intent::Right => "RIGHT",
            Intent::Mid => "MID",
            Intent::Substitute => "SUBSTITUTE",
            Intent::Trim => "TRIM",
            Intent::Proper => "PROPER",
            Intent::Upper => "UPPER",
            Intent::Lower => "LOWER",
            Intent::AndCheck => "AND",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A successful pattern match: the intent and its operands in capture order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedIntent {
    pub intent: Intent,
    pub captures: Vec<String>,
}

impl ParsedIntent {
    pub fn new(intent: Intent, captures: Vec<String>) -> Self {
        Self { intent, captures }
    }

    /// Capture at `index`, or an empty string when the slot did not participate
    pub fn capture(&self, index: usize) -> &str {
        self.captures.get(index).map(String::as_str).unwrap_or("")
    }
}
