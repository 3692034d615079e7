use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, SheetError>;

/// Error type covering the ways reading, validating, or writing an order
/// workbook can fail.
#[derive(Debug, Error)]
pub enum SheetError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when a configuration file cannot be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when an expected header is not present on a sheet.
    #[error("column '{column}' not found in sheet '{sheet}'")]
    MissingColumn { sheet: String, column: String },

    /// Raised when a sheet the operation depends on does not exist.
    #[error("sheet '{0}' not found")]
    MissingSheet(String),

    /// Raised when an order row refers to a path the catalog does not know.
    #[error("no path '{label}' found for item '{item}'")]
    MissingPath { item: String, label: String },

    /// Raised when a quantity rule column does not hold a number.
    #[error("invalid number '{value}' in column {column}")]
    InvalidNumber { column: String, value: String },

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the output path would overwrite the input workbook.
    #[error("refusing to overwrite the input workbook: {0}")]
    InPlaceOutput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl SheetError {
    pub(crate) fn missing_column(sheet: &str, column: &str) -> Self {
        SheetError::MissingColumn {
            sheet: sheet.to_string(),
            column: column.to_string(),
        }
    }
}
