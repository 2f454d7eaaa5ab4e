//! HTML fragment renderer.
//!
//! Emits the page's display regions with stable ids (`info`, `error`,
//! `am-text`, `am-color`, `pm-text`, `pm-color`) so the fragment can be
//! dropped into, or diffed against, the roster page.

use crate::{schedule_message, swatch_text, Rgb8, StatusLine, UNAVAILABLE_TEXT};
use rostercheck_core::{Cell, Color, DaySchedule, RenderError, Renderer, ScheduleQuery, Slot};
use std::fmt::Write;

/// HTML fragment renderer
#[derive(Clone, Debug, Default)]
pub struct HtmlRenderer {
    /// Wrap the fragment in a minimal standalone document
    pub standalone: bool,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standalone(mut self) -> Self {
        self.standalone = true;
        self
    }
}

impl HtmlRenderer {
    /// The page after a failed fetch: the status line's error and `N/A` in
    /// both slots on white
    pub fn render_failure(&self, status: &StatusLine) -> Result<String, RenderError> {
        let unavailable = Cell::new(UNAVAILABLE_TEXT, Color::WHITE);
        let slots = Slot::ALL.map(|slot| (slot, UNAVAILABLE_TEXT, &unavailable));
        self.page(&status.info, &status.error, &slots)
    }

    fn page(&self, info: &str, error: &str, slots: &[(Slot, &str, &Cell)]) -> Result<String, RenderError> {
        let fmt_err = |e: std::fmt::Error| RenderError::Format(e.to_string());
        let mut html = String::new();

        if self.standalone {
            html.push_str("<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Roster</title></head>\n<body>\n");
        }

        html.push_str("<section class=\"schedule\">\n");
        writeln!(html, "  <p id=\"info\">{}</p>", html_escape(info)).map_err(fmt_err)?;
        writeln!(html, "  <p id=\"error\">{}</p>", html_escape(error)).map_err(fmt_err)?;

        for (slot, label, appearance) in slots {
            let id = slot.as_str().to_lowercase();
            let fill = Rgb8::from_color(&appearance.background);
            writeln!(
                html,
                "  <div class=\"slot\">\n    <span class=\"slot-name\">{slot}</span>\n    <span id=\"{id}-text\">{label}</span>\n    <span id=\"{id}-color\" style=\"background-color: {css}\">{text}</span>\n  </div>",
                label = html_escape(label),
                css = fill.css(),
                text = html_escape(swatch_text(appearance)),
            )
            .map_err(fmt_err)?;
        }
        html.push_str("</section>\n");

        if self.standalone {
            html.push_str("</body>\n</html>\n");
        }
        Ok(html)
    }
}

impl Renderer for HtmlRenderer {
    type Output = String;

    fn render(&self, query: &ScheduleQuery, schedule: &DaySchedule) -> Result<String, RenderError> {
        let info = schedule_message(query.trimmed_person(), query.date);
        let slots: Vec<_> = schedule
            .iter()
            .map(|(slot, a)| (slot, a.label.as_str(), &a.appearance))
            .collect();
        self.page(&info, "", &slots)
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rostercheck_core::{Assignment, LegendEntry, RosterError};

    fn query() -> ScheduleQuery {
        ScheduleQuery::new("Bob", NaiveDate::from_ymd_opt(2023, 6, 15).unwrap())
    }

    #[test]
    fn html_escape_works() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("R&D \"ops\""), "R&amp;D &quot;ops&quot;");
    }

    #[test]
    fn regions_carry_label_and_fill() {
        let entry = LegendEntry::new("R&D", Cell::new("RD", Color::rgb(0.2, 0.6, 0.9)));
        let schedule = rostercheck_core::DaySchedule {
            am: Assignment::matched(&entry),
            pm: Assignment::weekend(),
        };
        let html = HtmlRenderer::new().render(&query(), &schedule).unwrap();

        assert!(html.contains("<p id=\"info\">Schedule for Bob on Thu Jun 15 2023</p>"));
        assert!(html.contains("<span id=\"am-text\">R&amp;D</span>"));
        assert!(html.contains("<span id=\"am-color\" style=\"background-color: rgb(51, 153, 230)\">RD</span>"));
        assert!(html.contains("<span id=\"pm-text\">Weekend</span>"));
        assert!(html.contains("rgb(255, 255, 255)\">🥳</span>"));
        assert!(!html.contains("<!DOCTYPE"));
    }

    #[test]
    fn standalone_document() {
        let schedule = rostercheck_core::DaySchedule::weekend();
        let html = HtmlRenderer::new().standalone().render(&query(), &schedule).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn failure_fills_error_and_blanks_slots() {
        let mut status = StatusLine::new();
        status.begin();
        status.fail(&RosterError::PersonNotFound("<Zed>".into()));
        let html = HtmlRenderer::new().render_failure(&status).unwrap();

        assert!(html.contains("<p id=\"info\">Fetching schedule... (0/3)</p>"));
        assert!(html.contains("<p id=\"error\">Could not find &quot;&lt;Zed&gt;&quot; on the roster</p>"));
        assert!(html.contains("<span id=\"am-text\">N/A</span>"));
        assert!(html.contains("<span id=\"pm-text\">N/A</span>"));
        assert!(html.contains("<span id=\"pm-color\" style=\"background-color: rgb(255, 255, 255)\">N/A</span>"));
    }

    #[test]
    fn success_leaves_error_region_empty() {
        let html = HtmlRenderer::new().render(&query(), &DaySchedule::weekend()).unwrap();
        assert!(html.contains("<p id=\"error\"></p>"));
    }
}
