//! Column letter and row number helpers
//!
//! Queries name whole columns (`column B`) or whole rows (`row 3`); the
//! renderers turn those into `B:B` style ranges and need the 1-based distance
//! between two of them for the `col_index_num` / `row_index_num` argument of
//! VLOOKUP and HLOOKUP.

use crate::error::{Result, TranslateError};

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u32 = 16_384;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Convert column letters to a 1-based index (A = 1, Z = 26, AA = 27, etc.)
///
/// # Examples
/// ```
/// use formula_forge_core::column_index;
///
/// assert_eq!(column_index("A").unwrap(), 1);
/// assert_eq!(column_index("c").unwrap(), 3);
/// assert_eq!(column_index("AA").unwrap(), 27);
/// assert!(column_index("7").is_err());
/// ```
pub fn column_index(letters: &str) -> Result<u32> {
    let letters = letters.trim();
    if letters.is_empty() {
        return Err(TranslateError::InvalidReference(letters.to_string()));
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(TranslateError::InvalidReference(letters.to_string()));
        }
        col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        if col > MAX_COLS {
            return Err(TranslateError::InvalidReference(letters.to_string()));
        }
    }

    Ok(col)
}

/// Validate column letters and return them uppercased (`b` -> `B`)
pub fn column_label(letters: &str) -> Result<String> {
    column_index(letters)?;
    Ok(letters.trim().to_ascii_uppercase())
}

/// Number of columns spanned by `start..=end`, in either direction
///
/// ```
/// use formula_forge_core::column_distance;
///
/// assert_eq!(column_distance("A", "C").unwrap(), 3);
/// assert_eq!(column_distance("C", "A").unwrap(), 3);
/// ```
pub fn column_distance(start: &str, end: &str) -> Result<u32> {
    let start = column_index(start)?;
    let end = column_index(end)?;
    Ok(start.abs_diff(end) + 1)
}

/// Parse a 1-based row number
pub fn row_number(row: &str) -> Result<u32> {
    let row = row.trim();
    match row.parse::<u32>() {
        Ok(n) if (1..=MAX_ROWS).contains(&n) => Ok(n),
        _ => Err(TranslateError::InvalidReference(row.to_string())),
    }
}

/// Number of rows spanned by `start..=end`, in either direction
pub fn row_distance(start: &str, end: &str) -> Result<u32> {
    let start = row_number(start)?;
    let end = row_number(end)?;
    Ok(start.abs_diff(end) + 1)
}
