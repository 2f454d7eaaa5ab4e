//! Spreadsheet column labels.
//!
//! Columns are numbered from 1 and labelled in bijective base 26:
//! `1 -> A`, `26 -> Z`, `27 -> AA`.

/// Label for a 1-based column number; empty for zero or negative input
pub fn to_label(column: i64) -> String {
    let mut label = String::new();
    let mut n = column;
    while n > 0 {
        let remainder = ((n - 1) % 26) as u8;
        label.insert(0, char::from(b'A' + remainder));
        n = (n - 1) / 26;
    }
    label
}

/// 1-based column number for a label such as `"AZ"` (case-insensitive)
pub fn from_label(label: &str) -> Option<u32> {
    if label.is_empty() {
        return None;
    }
    label.chars().try_fold(0u32, |acc, c| {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = u32::from(c.to_ascii_uppercase() as u8 - b'A') + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })
}
