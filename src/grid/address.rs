//! A1-style addressing for grid coordinates

/// Convert a zero-based column index to its spreadsheet letter
///
/// Examples:
/// - 0 → A
/// - 25 → Z
/// - 26 → AA
pub fn column_letter(index: usize) -> String {
    let mut result = String::new();
    let mut idx = index;

    loop {
        let remainder = idx % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }

    result
}

/// Convert spreadsheet column letters back to a zero-based index (A → 0, AA → 26)
///
/// Case-insensitive. Returns `None` for empty or non-alphabetic input.
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }

    let mut index: usize = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        index = index.checked_mul(26)?.checked_add(digit)?;
    }

    Some(index - 1)
}

/// A1 reference for a zero-based (row, column) pair, e.g. (0, 0) → "A1"
pub fn cell_reference(row: usize, col: usize) -> String {
    format!("{}{}", column_letter(col), row + 1)
}
