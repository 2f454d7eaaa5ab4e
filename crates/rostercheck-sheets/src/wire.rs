//! Sheets v4 response shapes and their conversion into roster grids.
//!
//! Only the fields selected by the request's field mask are present; every
//! level of nesting is optional on the wire.

use rostercheck_core::{CellValue, Color, Grid, GridCell, Projection, SheetError};
use serde::Deserialize;

/// Field mask for grid reads
pub fn field_mask(projection: Projection) -> &'static str {
    match projection {
        Projection::Values => "sheets(data(rowData(values(effectiveValue))))",
        Projection::ValuesAndBackground => {
            "sheets(data(rowData(values(effectiveValue,effectiveFormat/backgroundColor))))"
        }
    }
}

/// `spreadsheets.get` response
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spreadsheet {
    pub sheets: Option<Vec<Sheet>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    #[serde(default)]
    pub data: Vec<GridData>,
}

/// One requested range
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridData {
    #[serde(default)]
    pub row_data: Vec<RowData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowData {
    #[serde(default)]
    pub values: Vec<CellData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    pub effective_value: Option<ExtendedValue>,
    pub effective_format: Option<CellFormat>,
}

/// Typed cell value; at most one field is set
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedValue {
    pub string_value: Option<String>,
    pub number_value: Option<f64>,
    pub bool_value: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellFormat {
    pub background_color: Option<Color>,
}

/// `spreadsheets.values.get` response
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    pub range: Option<String>,
    pub major_dimension: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ApiError,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    pub status: Option<String>,
}

impl ExtendedValue {
    fn into_value(self) -> Option<CellValue> {
        if let Some(s) = self.string_value {
            Some(CellValue::Text(s))
        } else if let Some(n) = self.number_value {
            Some(CellValue::Number(n))
        } else {
            self.bool_value.map(CellValue::Bool)
        }
    }
}

impl CellData {
    fn into_grid_cell(self) -> GridCell {
        let background = self
            .effective_format
            .and_then(|format| format.background_color)
            .unwrap_or_default();
        GridCell::new(
            self.effective_value.and_then(ExtendedValue::into_value),
            background,
        )
    }
}

impl GridData {
    fn into_grid(self) -> Grid {
        Grid::new(
            self.row_data
                .into_iter()
                .map(|row| row.values.into_iter().map(|c| Some(c.into_grid_cell())).collect())
                .collect(),
        )
    }
}

/// Flatten a `spreadsheets.get` response into one grid per requested range.
///
/// Fails when the response lacks the `sheets` level or carries a different
/// number of data blocks than ranges were requested.
pub fn grids_from_spreadsheet(
    spreadsheet: Spreadsheet,
    expected: usize,
) -> Result<Vec<Grid>, SheetError> {
    let sheets = spreadsheet
        .sheets
        .ok_or_else(|| SheetError::Parse("response has no sheets".into()))?;

    let grids: Vec<Grid> = sheets
        .into_iter()
        .flat_map(|sheet| sheet.data)
        .map(GridData::into_grid)
        .collect();

    if grids.len() != expected {
        return Err(SheetError::Parse(format!(
            "expected {expected} data block(s), got {}",
            grids.len()
        )));
    }
    Ok(grids)
}

/// First column of a column-major `values.get` response.
///
/// Blank strings read as `None`; numbers and booleans keep their JSON text.
pub fn column_from_value_range(range: ValueRange) -> Result<Vec<Option<String>>, SheetError> {
    if let Some(dimension) = range.major_dimension.as_deref() {
        if dimension != "COLUMNS" {
            return Err(SheetError::Parse(format!(
                "expected COLUMNS major dimension, got {dimension}"
            )));
        }
    }

    let column = range.values.into_iter().next().unwrap_or_default();
    Ok(column
        .into_iter()
        .map(|value| match value {
            serde_json::Value::String(s) if s.trim().is_empty() => None,
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        })
        .collect())
}

/// Human-readable message from an error body, falling back to the raw text
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(status) => format!("{status}: {}", envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) => body.trim().to_string(),
    }
}
