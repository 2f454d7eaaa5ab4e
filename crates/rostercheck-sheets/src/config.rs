//! Connection settings for the Sheets API.

use rostercheck_core::SheetError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Spreadsheet holding the roster
pub const DEFAULT_SPREADSHEET_ID: &str = "1-l37wl_YlE6AsL_ao4nHxs1ooIxpuRUwwIjfzWl82m4";

/// Sheets v4 spreadsheets collection
pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Sheets API connection settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetsConfig {
    /// Identifier of the roster spreadsheet
    pub spreadsheet_id: String,
    /// Spreadsheets collection URL; the id is appended as a path segment
    pub base_url: String,
    /// Per-request HTTP timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: DEFAULT_SPREADSHEET_ID.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout_seconds: 30,
        }
    }
}

impl SheetsConfig {
    pub fn validate(&self) -> Result<(), SheetError> {
        if self.spreadsheet_id.trim().is_empty() {
            return Err(SheetError::Config("spreadsheet_id must not be empty".into()));
        }
        if self.timeout_seconds == 0 {
            return Err(SheetError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        let url = Url::parse(&self.base_url)
            .map_err(|e| SheetError::Config(format!("base_url {:?}: {e}", self.base_url)))?;
        if url.cannot_be_a_base() {
            return Err(SheetError::Config(format!(
                "base_url {:?} cannot carry a path",
                self.base_url
            )));
        }
        Ok(())
    }

    /// URL of the spreadsheet resource, with optional trailing path segments
    pub fn spreadsheet_url(&self, segments: &[&str]) -> Result<Url, SheetError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SheetError::Config(format!("base_url {:?}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| SheetError::Config(format!("base_url {:?} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .push(&self.spreadsheet_id)
            .extend(segments);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SheetsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn empty_spreadsheet_id_rejected() {
        let config = SheetsConfig {
            spreadsheet_id: " ".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("spreadsheet_id"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SheetsConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("timeout_seconds"));
    }

    #[test]
    fn bad_base_url_rejected() {
        let config = SheetsConfig {
            base_url: "not a url".into(),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("base_url"));
    }

    #[test]
    fn spreadsheet_url_appends_segments() {
        let config = SheetsConfig {
            spreadsheet_id: "abc".into(),
            base_url: "http://localhost:9000/v4/spreadsheets/".into(),
            ..Default::default()
        };
        let url = config.spreadsheet_url(&[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/v4/spreadsheets/abc");

        let url = config.spreadsheet_url(&["values", "JUN!B:B"]).unwrap();
        assert_eq!(url.path(), "/v4/spreadsheets/abc/values/JUN!B:B");

        let url = config.spreadsheet_url(&["values", "'My Roster'!B:B"]).unwrap();
        assert_eq!(url.path(), "/v4/spreadsheets/abc/values/'My%20Roster'!B:B");
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = serde_json::from_str::<SheetsConfig>(r#"{"spreadsheetid": "abc"}"#).unwrap_err();
        assert!(err.to_string().contains("spreadsheetid"), "{err}");

        let config: SheetsConfig = serde_json::from_str(r#"{"spreadsheet_id": "abc"}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
