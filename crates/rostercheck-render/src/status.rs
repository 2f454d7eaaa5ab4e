//! Status line and fetch control.
//!
//! The status line has an info half (progress, then the result heading) and
//! an error half. The fetch control is disabled for exactly as long as a
//! [`BusyGuard`] lives, so every exit path re-enables it.

use chrono::NaiveDate;
use rostercheck_core::{Progress, RosterError, DATE_FORMAT, TOTAL_STEPS};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::error;

/// `Fetching schedule... (n/3)`
pub fn progress_message(progress: Progress) -> String {
    format!("Fetching schedule... ({}/{TOTAL_STEPS})", progress.step())
}

/// `Schedule for Bob on Thu Jun 15 2023`
pub fn schedule_message(person: &str, date: NaiveDate) -> String {
    format!("Schedule for {person} on {}", date.format(DATE_FORMAT))
}

/// Info and error lines
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusLine {
    pub info: String,
    pub error: String,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start of a fetch: clears any previous error
    pub fn begin(&mut self) {
        self.error.clear();
        self.progress(Progress::Started);
    }

    pub fn progress(&mut self, progress: Progress) {
        self.info = progress_message(progress);
    }

    pub fn success(&mut self, person: &str, date: NaiveDate) {
        self.info = schedule_message(person, date);
        self.error.clear();
    }

    /// Show the user-facing message; full detail goes to the log
    pub fn fail(&mut self, err: &RosterError) {
        if matches!(err, RosterError::Sheet(_)) {
            error!(error = %err, "schedule fetch failed");
        }
        self.error = err.user_message();
    }
}

/// The fetch action's enabled state
#[derive(Debug, Default)]
pub struct FetchControl {
    busy: AtomicBool,
}

impl FetchControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        !self.busy.load(Ordering::Acquire)
    }

    /// Disable the control until the returned guard drops; `None` while a
    /// fetch is already running
    pub fn acquire(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard { control: self })
    }
}

/// Re-enables the fetch control on drop
#[derive(Debug)]
pub struct BusyGuard<'a> {
    control: &'a FetchControl,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.control.busy.store(false, Ordering::Release);
    }
}
