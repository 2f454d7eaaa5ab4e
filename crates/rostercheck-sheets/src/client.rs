//! HTTP client for the Sheets v4 REST API.

use crate::config::SheetsConfig;
use crate::wire::{self, Spreadsheet, ValueRange};
use rostercheck_core::{A1Range, CredentialSlot, Grid, Projection, SheetError, SheetSource};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

/// Read-only Sheets client.
///
/// Every request carries the credential currently in the slot; with the
/// slot empty, reads fail with [`SheetError::Unauthenticated`] before any
/// network traffic.
#[derive(Clone, Debug)]
pub struct SheetsClient {
    http: reqwest::Client,
    config: SheetsConfig,
    credentials: CredentialSlot,
}

impl SheetsClient {
    pub fn new(config: SheetsConfig, credentials: CredentialSlot) -> Result<Self, SheetError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("rostercheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SheetError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            config,
            credentials,
        })
    }

    pub fn config(&self) -> &SheetsConfig {
        &self.config
    }

    pub fn credentials(&self) -> &CredentialSlot {
        &self.credentials
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T, SheetError> {
        let credential = self.credentials.require()?;

        let response = self
            .http
            .get(url.clone())
            .bearer_auth(credential.token())
            .query(query)
            .send()
            .await
            .map_err(|e| {
                error!(url = %url, error = %e, "sheets request failed");
                SheetError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SheetError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = wire::error_message(&body);
            error!(status = status.as_u16(), %message, "sheets request rejected");
            return Err(SheetError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "sheets response did not parse");
            SheetError::Parse(e.to_string())
        })
    }
}

impl SheetSource for SheetsClient {
    async fn read_column(&self, range: &A1Range) -> Result<Vec<Option<String>>, SheetError> {
        let range_text = range.to_string();
        debug!(range = %range_text, "reading column");

        let url = self.config.spreadsheet_url(&["values", &range_text])?;
        let values: ValueRange = self
            .get_json(url, &[("majorDimension", "COLUMNS".to_string())])
            .await?;
        wire::column_from_value_range(values)
    }

    async fn read_grids(
        &self,
        ranges: &[A1Range],
        projection: Projection,
    ) -> Result<Vec<Grid>, SheetError> {
        debug!(
            ranges = ?ranges.iter().map(ToString::to_string).collect::<Vec<_>>(),
            ?projection,
            "reading grids"
        );

        let url = self.config.spreadsheet_url(&[])?;
        let mut query: Vec<(&str, String)> = ranges
            .iter()
            .map(|range| ("ranges", range.to_string()))
            .collect();
        query.push(("fields", wire::field_mask(projection).to_string()));

        let spreadsheet: Spreadsheet = self.get_json(url, &query).await?;
        wire::grids_from_spreadsheet(spreadsheet, ranges.len())
    }
}
