//! Locating a person's row and a day's column on a month sheet.
//!
//! Both searches return 1-based sheet coordinates, assuming the scanned
//! range starts at row 1 (name column) or column A (header row).

use chrono::{Datelike, NaiveDate};
use rostercheck_core::{names_match, GridCell};

/// Row of the first name cell matching `person`, ignoring case and
/// surrounding whitespace. Rows with no value never match.
pub fn find_person_row(names: &[Option<String>], person: &str) -> Option<u32> {
    names
        .iter()
        .position(|name| name.as_deref().is_some_and(|n| names_match(n, person)))
        .and_then(|index| u32::try_from(index + 1).ok())
}

/// Column of the first header cell whose numeric value is the day of month.
///
/// Text that happens to read like the day does not count, and neither do
/// cells without a value.
pub fn find_day_column(header: &[Option<GridCell>], date: NaiveDate) -> Option<u32> {
    let day = f64::from(date.day());
    header
        .iter()
        .position(|cell| {
            cell.as_ref()
                .and_then(|c| c.value.as_ref())
                .and_then(|v| v.as_number())
                == Some(day)
        })
        .and_then(|index| u32::try_from(index + 1).ok())
}
