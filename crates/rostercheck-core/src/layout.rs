//! Where things live on the roster spreadsheet.
//!
//! Each month has its own sheet, named by the upper-case English month
//! abbreviation (`JAN`, `FEB`, ...). On a month sheet, one column holds the
//! names, one header row holds the day of month above each day's AM column,
//! and the PM column follows immediately to the right. The legend lives on a
//! separate sheet as label/appearance column pairs.

use crate::{column, A1Range};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid roster layout
#[derive(Debug, Error)]
#[error("invalid roster layout: {0}")]
pub struct LayoutError(pub String);

/// Roster spreadsheet layout
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RosterLayout {
    /// Column holding one name per row
    pub name_column: String,
    /// Row holding the day-of-month numbers
    pub header_row: u32,
    /// Sheet holding the legend
    pub legend_sheet: String,
    /// Two-column legend blocks (label, appearance), read in order
    pub legend_ranges: Vec<String>,
    /// Earliest date the roster covers
    pub epoch_floor: NaiveDate,
}

impl Default for RosterLayout {
    fn default() -> Self {
        Self {
            name_column: "B".into(),
            header_row: 2,
            legend_sheet: "KEY".into(),
            legend_ranges: vec!["A2:B31".into(), "A34:B48".into(), "D2:E9".into()],
            epoch_floor: NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid calendar date"),
        }
    }
}

impl RosterLayout {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if column::from_label(&self.name_column).is_none() {
            return Err(LayoutError(format!(
                "name_column {:?} is not a column label",
                self.name_column
            )));
        }
        if self.header_row == 0 {
            return Err(LayoutError("header_row must be greater than 0".into()));
        }
        if self.legend_sheet.is_empty() {
            return Err(LayoutError("legend_sheet must not be empty".into()));
        }
        if self.legend_ranges.is_empty() {
            return Err(LayoutError("at least one legend range is required".into()));
        }
        Ok(())
    }

    /// Month sheet for a date, e.g. `JUN`
    pub fn sheet_for(&self, date: NaiveDate) -> String {
        date.format("%b").to_string().to_uppercase()
    }

    /// Whole name column of the month sheet
    pub fn name_range(&self, date: NaiveDate) -> A1Range {
        A1Range::new(
            self.sheet_for(date),
            format!("{0}:{0}", self.name_column),
        )
    }

    /// Whole header row of the month sheet
    pub fn header_range(&self, date: NaiveDate) -> A1Range {
        A1Range::new(self.sheet_for(date), format!("{0}:{0}", self.header_row))
    }

    /// The AM and PM cells of one roster row, starting at `column`
    pub fn slot_range(&self, date: NaiveDate, row: u32, column: u32) -> A1Range {
        let first = column::to_label(i64::from(column));
        let last = column::to_label(i64::from(column) + 1);
        A1Range::new(self.sheet_for(date), format!("{first}{row}:{last}{row}"))
    }

    pub fn legend_ranges(&self) -> Vec<A1Range> {
        self.legend_ranges
            .iter()
            .map(|cells| A1Range::new(self.legend_sheet.clone(), cells.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn june_15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, 15).unwrap()
    }

    #[test]
    fn default_layout_is_valid() {
        let layout = RosterLayout::default();
        assert!(layout.validate().is_ok());
        assert_eq!(layout.epoch_floor, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(layout.legend_ranges.len(), 3);
    }

    #[test]
    fn month_sheet_names() {
        let layout = RosterLayout::default();
        assert_eq!(layout.sheet_for(june_15()), "JUN");
        assert_eq!(
            layout.sheet_for(NaiveDate::from_ymd_opt(2024, 9, 2).unwrap()),
            "SEP"
        );
    }

    #[test]
    fn ranges() {
        let layout = RosterLayout::default();
        assert_eq!(layout.name_range(june_15()).to_string(), "JUN!B:B");
        assert_eq!(layout.header_range(june_15()).to_string(), "JUN!2:2");
        assert_eq!(layout.slot_range(june_15(), 4, 10).to_string(), "JUN!J4:K4");
        assert_eq!(layout.slot_range(june_15(), 7, 26).to_string(), "JUN!Z7:AA7");

        let legend: Vec<String> = layout.legend_ranges().iter().map(ToString::to_string).collect();
        assert_eq!(legend, vec!["KEY!A2:B31", "KEY!A34:B48", "KEY!D2:E9"]);
    }

    #[test]
    fn invalid_layouts_rejected() {
        let layout = RosterLayout {
            name_column: "B2".into(),
            ..Default::default()
        };
        assert!(layout.validate().unwrap_err().to_string().contains("name_column"));

        let layout = RosterLayout {
            header_row: 0,
            ..Default::default()
        };
        assert!(layout.validate().unwrap_err().to_string().contains("header_row"));

        let layout = RosterLayout {
            legend_ranges: vec![],
            ..Default::default()
        };
        assert!(layout.validate().unwrap_err().to_string().contains("legend"));
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let layout: RosterLayout = toml::from_str(
            r#"
            name_column = "C"
            epoch_floor = "2024-01-01"
            "#,
        )
        .unwrap();
        assert_eq!(layout.name_column, "C");
        assert_eq!(layout.header_row, 2);
        assert_eq!(layout.epoch_floor, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = toml::from_str::<RosterLayout>("nmae_column = \"C\"").unwrap_err();
        assert!(err.to_string().contains("nmae_column"), "{err}");
    }
}
