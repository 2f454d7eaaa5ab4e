//! # rostercheck-sheets
//!
//! Google Sheets v4 reader for rostercheck.
//!
//! This crate provides:
//! - [`SheetsClient`], a [`SheetSource`](rostercheck_core::SheetSource) over the REST API
//! - Wire types for `spreadsheets.get` and `spreadsheets.values.get` responses
//! - Conversion of responses into roster [`Grid`](rostercheck_core::Grid)s
//!
//! ## Example
//!
//! ```rust,no_run
//! use rostercheck_core::{A1Range, Credential, CredentialSlot, SheetSource};
//! use rostercheck_sheets::{SheetsClient, SheetsConfig};
//!
//! # async fn run() -> Result<(), rostercheck_core::SheetError> {
//! let credentials = CredentialSlot::new();
//! credentials.set(Credential::bearer("ya29.token").unwrap());
//!
//! let client = SheetsClient::new(SheetsConfig::default(), credentials)?;
//! let names = client.read_column(&A1Range::new("JUN", "B:B")).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod wire;

pub use client::SheetsClient;
pub use config::{SheetsConfig, DEFAULT_BASE_URL, DEFAULT_SPREADSHEET_ID};
