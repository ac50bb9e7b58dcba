//! Error types for loading, validating and exporting consumption tables.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;

/// The supplied file could not be turned into a table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read \"{path}\": {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("unsupported file type \"{0}\" (expected .csv or .xlsx)")]
    UnsupportedFormat(String),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid spreadsheet: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    #[error("spreadsheet has no sheets")]
    NoSheets,

    #[error("table has no header row")]
    MissingHeader,
}

/// The table does not have the shape the analysis needs.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("missing column(s) {}; the table must have columns: {}", quote(missing), quote(required))]
    MissingColumns {
        missing: Vec<String>,
        required: Vec<String>,
    },

    #[error("column \"{column}\", row {row}: {message}")]
    InvalidCell {
        column: String,
        /// 1-based data row, header excluded.
        row: usize,
        message: String,
    },
}

fn quote(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("\"{n}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Writing the annotated table failed.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("spreadsheet export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("cannot write \"{path}\": {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Any failure on the way from input file to rendered report.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
