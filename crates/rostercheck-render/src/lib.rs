//! # rostercheck-render
//!
//! Rendering backends for resolved roster schedules.
//!
//! This crate provides:
//! - Terminal text output, optionally with true-color swatches
//! - JSON output for scripting
//! - An HTML fragment with the page's named display regions
//! - Status line messages and the fetch control's busy guard
//!
//! Colors arrive with channels in `[0, 1]` and are only scaled to
//! `[0, 255]` here, through [`Rgb8`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use rostercheck_core::Renderer;
//! use rostercheck_render::TextRenderer;
//!
//! let text = TextRenderer::new().render(&query, &schedule)?;
//! print!("{text}");
//! ```

pub mod html;
pub mod status;

pub use html::HtmlRenderer;
pub use status::{progress_message, schedule_message, BusyGuard, FetchControl, StatusLine};

use rostercheck_core::{
    Assignment, AssignmentKind, Cell, Color, DaySchedule, LegendEntry, RenderError, Renderer,
    ScheduleQuery, Slot,
};
use serde::Serialize;
use std::fmt::Write;

/// Slot text shown after a failed fetch
pub const UNAVAILABLE_TEXT: &str = "N/A";

/// A color scaled for display
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    /// Scale `[0, 1]` channels to `[0, 255]`; absent channels are 0
    pub fn from_color(color: &Color) -> Self {
        let [r, g, b] = color.channels().map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        Self { r, g, b }
    }

    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Black or white, whichever reads better on this fill
    pub fn contrasting(&self) -> Self {
        let luma = 0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b);
        if luma > 140.0 {
            Self { r: 0, g: 0, b: 0 }
        } else {
            Self {
                r: 255,
                g: 255,
                b: 255,
            }
        }
    }
}

/// Swatch text; blank cells show a single space
fn swatch_text(cell: &Cell) -> &str {
    if cell.text.is_empty() {
        " "
    } else {
        &cell.text
    }
}

// ============================================================================
// Text
// ============================================================================

/// Plain text renderer for console output
#[derive(Clone, Debug, Default)]
pub struct TextRenderer {
    /// Paint swatches with 24-bit ANSI background colors
    pub color: bool,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn swatch(&self, cell: &Cell) -> String {
        let text = swatch_text(cell);
        if !self.color {
            return format!("[{text}]");
        }
        let fill = Rgb8::from_color(&cell.background);
        let ink = fill.contrasting();
        format!(
            "\x1b[48;2;{};{};{}m\x1b[38;2;{};{};{}m {text} \x1b[0m",
            fill.r, fill.g, fill.b, ink.r, ink.g, ink.b
        )
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, query: &ScheduleQuery, schedule: &DaySchedule) -> Result<String, RenderError> {
        let mut out = String::new();
        let fmt_err = |e: std::fmt::Error| RenderError::Format(e.to_string());

        writeln!(out, "{}", schedule_message(query.trimmed_person(), query.date)).map_err(fmt_err)?;
        let width = schedule.iter().map(|(_, a)| a.label.chars().count()).max().unwrap_or(0);
        for (slot, assignment) in schedule.iter() {
            writeln!(
                out,
                "{slot}  {label:<width$}  {swatch}",
                label = assignment.label,
                swatch = self.swatch(&assignment.appearance),
            )
            .map_err(fmt_err)?;
        }
        Ok(out)
    }
}

impl TextRenderer {
    /// One line per legend entry: label, swatch and fill
    pub fn render_legend(&self, legend: &[LegendEntry]) -> String {
        let width = legend.iter().map(|e| e.label.chars().count()).max().unwrap_or(0);
        legend
            .iter()
            .map(|entry| {
                let background = &entry.appearance.background;
                let fill = if background.is_unfilled() {
                    "no fill".to_string()
                } else {
                    Rgb8::from_color(background).hex()
                };
                format!(
                    "{label:<width$}  {swatch}  {fill}\n",
                    label = entry.label,
                    swatch = self.swatch(&entry.appearance),
                )
            })
            .collect()
    }
}

// ============================================================================
// JSON
// ============================================================================

#[derive(Serialize)]
struct SlotView<'a> {
    slot: Slot,
    label: &'a str,
    kind: AssignmentKind,
    text: &'a str,
    /// `None` for unfilled (holiday) cells
    fill: Option<String>,
}

impl<'a> SlotView<'a> {
    fn new(slot: Slot, assignment: &'a Assignment) -> Self {
        let background = &assignment.appearance.background;
        Self {
            slot,
            label: &assignment.label,
            kind: assignment.kind,
            text: &assignment.appearance.text,
            fill: (!background.is_unfilled()).then(|| Rgb8::from_color(background).hex()),
        }
    }
}

#[derive(Serialize)]
struct ScheduleView<'a> {
    person: &'a str,
    date: String,
    slots: Vec<SlotView<'a>>,
}

/// JSON renderer for scripting
#[derive(Clone, Debug, Default)]
pub struct JsonRenderer {
    pub pretty: bool,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}

impl Renderer for JsonRenderer {
    type Output = String;

    fn render(&self, query: &ScheduleQuery, schedule: &DaySchedule) -> Result<String, RenderError> {
        let view = ScheduleView {
            person: query.trimmed_person(),
            date: query.date.format("%Y-%m-%d").to_string(),
            slots: schedule.iter().map(|(slot, a)| SlotView::new(slot, a)).collect(),
        };
        let json = if self.pretty {
            serde_json::to_string_pretty(&view)
        } else {
            serde_json::to_string(&view)
        };
        json.map_err(|e| RenderError::Format(e.to_string()))
    }
}
