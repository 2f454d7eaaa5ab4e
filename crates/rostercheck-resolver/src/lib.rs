//! # rostercheck-resolver
//!
//! Resolves which project a person is assigned to for the morning and
//! afternoon of a day, from a color-coded roster.
//!
//! # Algorithm
//!
//! 1. Reject blank names and dates before the roster's first date
//! 2. Weekends resolve immediately, without reading the sheet
//! 3. Concurrently: find the person's row, find the day's column, read the legend
//! 4. Read the AM cell and the PM cell to its right
//! 5. Classify each cell: holiday if unfilled, else first legend match,
//!    else "Key not found"
//!
//! ## Example
//!
//! ```rust,ignore
//! use rostercheck_core::{RosterLayout, ScheduleQuery};
//! use rostercheck_resolver::RosterResolver;
//!
//! let resolver = RosterResolver::new(sheets_client, RosterLayout::default());
//! let schedule = resolver.resolve(&ScheduleQuery::new("Bob", date)).await?;
//! println!("AM: {}  PM: {}", schedule.am.label, schedule.pm.label);
//! ```

pub mod legend;
pub mod lookup;

pub use legend::{classify, legend_from_grids};
pub use lookup::{find_day_column, find_person_row};

use chrono::NaiveDate;
use rostercheck_core::{
    Cell, DaySchedule, Grid, GridCell, LegendEntry, Progress, Projection, RosterError,
    RosterLayout, ScheduleQuery, SheetError, SheetSource, Slot,
};
use tracing::{debug, info};

/// Roster resolver over a sheet source
pub struct RosterResolver<S> {
    source: S,
    layout: RosterLayout,
}

impl<S: SheetSource> RosterResolver<S> {
    pub fn new(source: S, layout: RosterLayout) -> Self {
        Self { source, layout }
    }

    pub fn layout(&self) -> &RosterLayout {
        &self.layout
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolve the AM/PM assignments for a person on a day
    pub async fn resolve(&self, query: &ScheduleQuery) -> Result<DaySchedule, RosterError> {
        self.resolve_with_progress(query, |_| {}).await
    }

    /// Like [`resolve`](Self::resolve), reporting progress as reads complete.
    ///
    /// Weekends and rejected queries report nothing.
    pub async fn resolve_with_progress(
        &self,
        query: &ScheduleQuery,
        mut on_progress: impl FnMut(Progress),
    ) -> Result<DaySchedule, RosterError> {
        let person = query.trimmed_person();
        if person.is_empty() {
            return Err(RosterError::EmptyName);
        }
        if query.date < self.layout.epoch_floor {
            return Err(RosterError::InvalidDate {
                date: query.date,
                floor: self.layout.epoch_floor,
            });
        }
        if query.is_weekend() {
            info!(date = %query.date, "weekend, no roster lookup");
            return Ok(DaySchedule::weekend());
        }

        on_progress(Progress::Started);
        let (row, column, legend) = futures::try_join!(
            self.find_row(query.date, person),
            self.find_column(query.date),
            self.fetch_legend(),
        )?;
        debug!(row, column, legend_entries = legend.len(), "roster coordinates found");
        on_progress(Progress::LookupsDone);

        let (am, pm) = self.fetch_slot_cells(query.date, row, column).await?;
        on_progress(Progress::CellsFetched);

        let schedule = DaySchedule {
            am: classify(&am, &legend),
            pm: classify(&pm, &legend),
        };
        info!(
            date = %query.date,
            am = %schedule.am.label,
            pm = %schedule.pm.label,
            "schedule resolved"
        );
        on_progress(Progress::Done);
        Ok(schedule)
    }

    /// Read the full legend, including the trailing "Not assigned" entry
    pub async fn fetch_legend(&self) -> Result<Vec<LegendEntry>, RosterError> {
        let ranges = self.layout.legend_ranges();
        let grids = self
            .source
            .read_grids(&ranges, Projection::ValuesAndBackground)
            .await?;
        Ok(legend_from_grids(&grids))
    }

    async fn find_row(&self, date: NaiveDate, person: &str) -> Result<u32, RosterError> {
        let names = self.source.read_column(&self.layout.name_range(date)).await?;
        find_person_row(&names, person).ok_or_else(|| RosterError::PersonNotFound(person.into()))
    }

    async fn find_column(&self, date: NaiveDate) -> Result<u32, RosterError> {
        let range = self.layout.header_range(date);
        let grids = self
            .source
            .read_grids(std::slice::from_ref(&range), Projection::Values)
            .await?;
        let header = single_grid(grids, &range.to_string())?;
        find_day_column(header.first_row(), date).ok_or(RosterError::DateColumnNotFound(date))
    }

    async fn fetch_slot_cells(
        &self,
        date: NaiveDate,
        row: u32,
        column: u32,
    ) -> Result<(Cell, Cell), RosterError> {
        let range = self.layout.slot_range(date, row, column);
        let range_text = range.to_string();
        let grids = self
            .source
            .read_grids(std::slice::from_ref(&range), Projection::ValuesAndBackground)
            .await?;
        let grid = single_grid(grids, &range_text)?;

        let slot_cell = |slot: Slot| -> Result<Cell, SheetError> {
            grid.cell(0, slot.column_offset() as usize)
                .map(GridCell::to_cell)
                .ok_or_else(|| SheetError::Parse(format!("no {slot} cell in {range_text}")))
        };
        Ok((slot_cell(Slot::Am)?, slot_cell(Slot::Pm)?))
    }
}

fn single_grid(grids: Vec<Grid>, range: &str) -> Result<Grid, SheetError> {
    grids
        .into_iter()
        .next()
        .ok_or_else(|| SheetError::Parse(format!("no data block for {range}")))
}
