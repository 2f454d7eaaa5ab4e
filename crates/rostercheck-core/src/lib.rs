//! # rostercheck-core
//!
//! Core domain model and traits for the rostercheck roster resolver.
//!
//! This crate provides:
//! - Domain types: `Cell`, `Color`, `LegendEntry`, `Assignment`, `DaySchedule`, `ScheduleQuery`
//! - Sheet addressing: `A1Range`, `Projection`, `Grid`, and the column label codec
//! - Core traits: `SheetSource`, `Renderer`
//! - Error types with user-facing messages
//!
//! ## Example
//!
//! ```rust
//! use rostercheck_core::{Assignment, Cell, Color, LegendEntry};
//!
//! let entry = LegendEntry::new("Project X", Cell::new("PRJ-X", Color::rgb(0.2, 0.6, 0.9)));
//! let cell = Cell::new("PRJ-X", Color::rgb(0.2, 0.6, 0.9));
//!
//! assert!(entry.matches(&cell));
//! assert_eq!(Assignment::matched(&entry).label, "Project X");
//! ```

pub mod auth;
pub mod column;
pub mod layout;

pub use auth::{Credential, CredentialSlot};
pub use layout::{LayoutError, RosterLayout};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use thiserror::Error;

// ============================================================================
// Labels
// ============================================================================

/// Display date format, e.g. `Thu Jun 15 2023`
pub const DATE_FORMAT: &str = "%a %b %d %Y";

/// Label of the synthesized weekend assignment
pub const WEEKEND_LABEL: &str = "Weekend";

/// Swatch text shown for weekend slots
pub const WEEKEND_TEXT: &str = "🥳";

/// Label of the synthesized assignment for unfilled roster cells
pub const HOLIDAY_LABEL: &str = "Holiday";

/// Label of the trailing legend entry for white, blank roster cells
pub const NOT_ASSIGNED_LABEL: &str = "Not assigned";

/// Placeholder label for cells whose appearance matches no legend entry
pub const KEY_NOT_FOUND_LABEL: &str = "Key not found";

// ============================================================================
// Color
// ============================================================================

/// Background color of a cell, channels in `[0, 1]`.
///
/// The Sheets API omits zero channels, so each channel is optional. A color
/// with no channels at all is the "no fill" sentinel used for holidays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub green: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blue: Option<f64>,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self {
            red: Some(red),
            green: Some(green),
            blue: Some(blue),
        }
    }

    /// The "no fill" color: no channel defined
    pub const fn unfilled() -> Self {
        Self {
            red: None,
            green: None,
            blue: None,
        }
    }

    pub fn is_unfilled(&self) -> bool {
        self.red.is_none() && self.green.is_none() && self.blue.is_none()
    }

    /// Channels with absent values read as 0
    pub fn channels(&self) -> [f64; 3] {
        [
            self.red.unwrap_or(0.0),
            self.green.unwrap_or(0.0),
            self.blue.unwrap_or(0.0),
        ]
    }
}

// ============================================================================
// Cells
// ============================================================================

/// Literal value of a spreadsheet cell
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Bool(true) => f.write_str("TRUE"),
            CellValue::Bool(false) => f.write_str("FALSE"),
        }
    }
}

/// A cell as returned by the sheet reader: literal value plus background fill
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridCell {
    pub value: Option<CellValue>,
    pub background: Color,
}

impl GridCell {
    pub fn new(value: Option<CellValue>, background: Color) -> Self {
        Self { value, background }
    }

    /// Display text of the value, empty when the cell has none
    pub fn text(&self) -> String {
        self.value.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    pub fn to_cell(&self) -> Cell {
        Cell::new(self.text(), self.background)
    }
}

/// One rectangular block of cells, in row order.
///
/// `None` marks a location the source returned no data for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grid {
    pub rows: Vec<Vec<Option<GridCell>>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Option<GridCell>>>) -> Self {
        Self { rows }
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&GridCell> {
        self.rows.get(row)?.get(column)?.as_ref()
    }

    pub fn first_row(&self) -> &[Option<GridCell>] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Text and fill of a roster or legend cell
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub text: String,
    pub background: Color,
}

impl Cell {
    pub fn new(text: impl Into<String>, background: Color) -> Self {
        Self {
            text: text.into(),
            background,
        }
    }

    pub fn is_unfilled(&self) -> bool {
        self.background.is_unfilled()
    }
}

// ============================================================================
// Legend
// ============================================================================

/// A legend row: human-readable label and the cell encoding it stands for
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub appearance: Cell,
}

impl LegendEntry {
    pub fn new(label: impl Into<String>, appearance: Cell) -> Self {
        Self {
            label: label.into(),
            appearance,
        }
    }

    /// Trailing entry matching white, blank roster cells
    pub fn not_assigned() -> Self {
        Self::new(NOT_ASSIGNED_LABEL, Cell::new("", Color::WHITE))
    }

    /// Exact text and structural color equality
    pub fn matches(&self, cell: &Cell) -> bool {
        self.appearance.text == cell.text && self.appearance.background == cell.background
    }
}

// ============================================================================
// Assignments
// ============================================================================

/// Where an assignment came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentKind {
    /// A legend entry matched the cell
    Matched,
    /// The cell had no background fill
    Holiday,
    /// The date falls on a weekend
    Weekend,
    /// No legend entry matched
    KeyNotFound,
}

/// Resolved assignment for one half-day slot
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub label: String,
    pub appearance: Cell,
    pub kind: AssignmentKind,
}

impl Assignment {
    pub fn matched(entry: &LegendEntry) -> Self {
        Self {
            label: entry.label.clone(),
            appearance: entry.appearance.clone(),
            kind: AssignmentKind::Matched,
        }
    }

    /// Keeps the cell's text, drops its (absent) fill
    pub fn holiday(cell: &Cell) -> Self {
        Self {
            label: HOLIDAY_LABEL.into(),
            appearance: Cell::new(cell.text.clone(), Color::unfilled()),
            kind: AssignmentKind::Holiday,
        }
    }

    pub fn weekend() -> Self {
        Self {
            label: WEEKEND_LABEL.into(),
            appearance: Cell::new(WEEKEND_TEXT, Color::WHITE),
            kind: AssignmentKind::Weekend,
        }
    }

    /// Carries the raw cell so the mismatch stays visible
    pub fn key_not_found(cell: &Cell) -> Self {
        Self {
            label: KEY_NOT_FOUND_LABEL.into(),
            appearance: cell.clone(),
            kind: AssignmentKind::KeyNotFound,
        }
    }
}

/// Half-day position on the roster
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Am,
    Pm,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::Am, Slot::Pm];

    /// Column offset from the day's first roster column
    pub const fn column_offset(self) -> u32 {
        match self {
            Slot::Am => 0,
            Slot::Pm => 1,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Slot::Am => "AM",
            Slot::Pm => "PM",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Morning and afternoon assignments for one person on one day
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub am: Assignment,
    pub pm: Assignment,
}

impl DaySchedule {
    pub fn weekend() -> Self {
        Self {
            am: Assignment::weekend(),
            pm: Assignment::weekend(),
        }
    }

    pub fn get(&self, slot: Slot) -> &Assignment {
        match slot {
            Slot::Am => &self.am,
            Slot::Pm => &self.pm,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, &Assignment)> {
        Slot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }
}

// ============================================================================
// Query
// ============================================================================

/// A person and a day to resolve
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleQuery {
    pub person: String,
    pub date: NaiveDate,
}

impl ScheduleQuery {
    pub fn new(person: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            person: person.into(),
            date,
        }
    }

    /// Name with surrounding whitespace removed
    pub fn trimmed_person(&self) -> &str {
        self.person.trim()
    }

    pub fn is_weekend(&self) -> bool {
        is_weekend(self.date)
    }
}

/// Saturday or Sunday (weekday numbers 6 and 0 counting from Sunday)
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday().num_days_from_sunday(), 0 | 6)
}

/// Case-insensitive name comparison, ignoring surrounding whitespace
pub fn names_match(roster_name: &str, query: &str) -> bool {
    roster_name.trim().to_lowercase() == query.trim().to_lowercase()
}

// ============================================================================
// Sheet Addressing
// ============================================================================

/// A range in A1 notation on a named sheet, e.g. `JUN!B:B`
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct A1Range {
    pub sheet: String,
    pub cells: String,
}

impl A1Range {
    pub fn new(sheet: impl Into<String>, cells: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            cells: cells.into(),
        }
    }
}

impl fmt::Display for A1Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plain = !self.sheet.is_empty()
            && self
                .sheet
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if plain {
            write!(f, "{}!{}", self.sheet, self.cells)
        } else {
            write!(f, "'{}'!{}", self.sheet.replace('\'', "''"), self.cells)
        }
    }
}

/// Which fields a grid read returns
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Projection {
    /// Effective values only
    Values,
    /// Effective values and resolved background color
    ValuesAndBackground,
}

// ============================================================================
// Progress
// ============================================================================

/// Number of steps reported while resolving a schedule
pub const TOTAL_STEPS: u8 = 3;

/// Resolution progress, reported to an optional observer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// Lookups issued
    Started,
    /// Row, column and legend known
    LookupsDone,
    /// AM/PM cells read
    CellsFetched,
    /// Assignments classified
    Done,
}

impl Progress {
    pub const fn step(self) -> u8 {
        match self {
            Progress::Started => 0,
            Progress::LookupsDone => 1,
            Progress::CellsFetched => 2,
            Progress::Done => 3,
        }
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Read-only access to the remote roster spreadsheet
pub trait SheetSource: Send + Sync {
    /// Raw values of a single column, one entry per row starting at the
    /// range's first row. `None` marks a row with no value.
    fn read_column(
        &self,
        range: &A1Range,
    ) -> impl Future<Output = Result<Vec<Option<String>>, SheetError>> + Send;

    /// One grid per requested range, in request order
    fn read_grids(
        &self,
        ranges: &[A1Range],
        projection: Projection,
    ) -> impl Future<Output = Result<Vec<Grid>, SheetError>> + Send;
}

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render a resolved schedule to the output format
    fn render(&self, query: &ScheduleQuery, schedule: &DaySchedule)
        -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Sheet reader error
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Not authenticated: no access token")]
    Unauthenticated,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Sheets API returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response shape: {0}")]
    Parse(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Roster resolution error
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("No name given")]
    EmptyName,

    #[error("Date {date} precedes the first roster date {floor}")]
    InvalidDate { date: NaiveDate, floor: NaiveDate },

    #[error("Person not found: {0}")]
    PersonNotFound(String),

    #[error("No roster column for {0}")]
    DateColumnNotFound(NaiveDate),

    #[error(transparent)]
    Sheet(#[from] SheetError),
}

impl RosterError {
    /// Message suitable for showing to the person who asked
    pub fn user_message(&self) -> String {
        match self {
            RosterError::EmptyName => "Please enter your name".into(),
            RosterError::InvalidDate { floor, .. } => {
                format!("Schedules are only available from {}", floor.format(DATE_FORMAT))
            }
            RosterError::PersonNotFound(name) => format!("Could not find \"{name}\" on the roster"),
            RosterError::DateColumnNotFound(date) => {
                format!("No roster column for {}", date.format(DATE_FORMAT))
            }
            RosterError::Sheet(SheetError::Unauthenticated) => {
                "Not signed in: no access token".into()
            }
            RosterError::Sheet(_) => "Something went wrong".into(),
        }
    }
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),
}

// ============================================================================
// Tests
// ============================================================================
