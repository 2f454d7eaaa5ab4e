//! `rostercheck.toml` loading.
//!
//! ```toml
//! [sheets]
//! spreadsheet_id = "1-l37wl_YlE6AsL_ao4nHxs1ooIxpuRUwwIjfzWl82m4"
//! timeout_seconds = 30
//!
//! [layout]
//! name_column = "B"
//! header_row = 2
//! legend_sheet = "KEY"
//! legend_ranges = ["A2:B31", "A34:B48", "D2:E9"]
//! epoch_floor = "2023-01-01"
//! ```
//!
//! Every key is optional.

use anyhow::{Context, Result};
use rostercheck_core::RosterLayout;
use rostercheck_sheets::SheetsConfig;
use serde::Deserialize;
use std::path::Path;

/// Looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "rostercheck.toml";

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub sheets: SheetsConfig,
    pub layout: RosterLayout,
}

impl Config {
    /// Explicit path, else `rostercheck.toml` if present, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    tracing::debug!("no {DEFAULT_CONFIG_FILE}, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.sheets.validate()?;
        self.layout.validate()?;
        Ok(())
    }
}
