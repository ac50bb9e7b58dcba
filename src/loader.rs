//! Reading consumption tables from CSV and XLSX files.

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use calamine::{Data, Reader, Xlsx};
use csv::{ReaderBuilder, Trim};
use tracing::{debug, info};

use crate::error::LoadError;
use crate::sample::sample_table;
use crate::table::{Table, Value};

/// Supported input file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Comma-separated text with a header row.
    Csv,
    /// Excel workbook; the first sheet is read.
    Xlsx,
}

impl TableFormat {
    /// Picks the format from the file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::UnsupportedFormat`] for anything but `.csv` / `.xlsx`.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("xlsx") => Ok(Self::Xlsx),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Loads a table from a file, choosing the parser by extension.
///
/// # Errors
///
/// Returns a `LoadError` if the extension is unsupported, the file cannot be
/// read, or its content does not parse.
pub fn load_path(path: &Path) -> Result<Table, LoadError> {
    let format = TableFormat::from_path(path)?;
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let table = load_bytes(&bytes, format)?;
    info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.columns().len(),
        "loaded table"
    );
    Ok(table)
}

/// Loads `input` if given, otherwise generates the sample day.
///
/// A failing `input` is returned as an error; it never falls back to the sample.
///
/// # Errors
///
/// Returns a `LoadError` from [`load_path`].
pub fn load_or_sample(input: Option<&Path>) -> Result<Table, LoadError> {
    match input {
        Some(path) => load_path(path),
        None => {
            info!("no input file, using sample data");
            Ok(sample_table())
        }
    }
}

/// Parses raw file content in the declared format.
///
/// # Errors
///
/// Returns a `LoadError` if the content does not parse.
pub fn load_bytes(bytes: &[u8], format: TableFormat) -> Result<Table, LoadError> {
    match format {
        TableFormat::Csv => read_csv(bytes),
        TableFormat::Xlsx => read_xlsx(bytes),
    }
}

/// Parses CSV with a header row. Rows must all have the header's width.
///
/// # Errors
///
/// Returns a `LoadError` on malformed CSV, ragged rows, or a missing header.
pub fn read_csv(reader: impl Read) -> Result<Table, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(LoadError::MissingHeader);
    }

    let mut table = Table::new(headers.iter());
    for record in rdr.records() {
        let record = record?;
        table.push_row(record.iter().map(Value::infer).collect());
    }
    debug!(rows = table.len(), "parsed CSV");
    Ok(table)
}

/// Parses the first sheet of an XLSX workbook; its first row is the header.
///
/// # Errors
///
/// Returns a `LoadError` if the bytes are not a workbook, it has no sheets,
/// or the first sheet is empty.
pub fn read_xlsx(bytes: &[u8]) -> Result<Table, LoadError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LoadError::NoSheets)??;

    let mut rows = range.rows();
    let header = rows.next().ok_or(LoadError::MissingHeader)?;
    let mut table = Table::new(header.iter().map(header_name));

    for row in rows {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        table.push_row(row.iter().map(cell_value).collect());
    }
    debug!(rows = table.len(), "parsed spreadsheet");
    Ok(table)
}

fn header_name(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Empty,
        Data::Int(i) => Value::Number(*i as f64),
        Data::Float(f) => Value::Number(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) => Value::infer(s),
        other => Value::Text(other.to_string()),
    }
}
