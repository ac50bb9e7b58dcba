//! XLSX and CSV export for annotated tables.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::info;

use crate::error::ExportError;
use crate::table::{Table, Value};

/// Download name offered for the exported workbook.
pub const EXPORT_FILE_NAME: &str = "energy_analysis.xlsx";

/// MIME type of an XLSX workbook.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Sheet name used for the exported table.
const SHEET_NAME: &str = "Analysis";

/// Serializes a table as a single-sheet XLSX workbook.
///
/// Row 1 holds the column names in table order (bold); data rows follow
/// without an index column. Empty cells are left blank.
///
/// # Errors
///
/// Returns an `ExportError` if the table exceeds sheet limits or the workbook
/// cannot be assembled.
pub fn xlsx_bytes(table: &Table) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (c, name) in table.columns().iter().enumerate() {
            sheet.write_string_with_format(0, col_num(c)?, name, &header)?;
        }

        for (r, row) in table.rows().iter().enumerate() {
            let r = row_num(r + 1)?;
            for (c, cell) in row.iter().enumerate() {
                let c = col_num(c)?;
                match cell {
                    Value::Empty => {}
                    Value::Number(n) => {
                        sheet.write_number(r, c, *n)?;
                    }
                    Value::Text(s) => {
                        sheet.write_string(r, c, s)?;
                    }
                    Value::Bool(b) => {
                        sheet.write_boolean(r, c, *b)?;
                    }
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn row_num(r: usize) -> Result<u32, XlsxError> {
    u32::try_from(r).map_err(|_| XlsxError::RowColumnLimitError)
}

fn col_num(c: usize) -> Result<u16, XlsxError> {
    u16::try_from(c).map_err(|_| XlsxError::RowColumnLimitError)
}

/// Writes a table as an XLSX workbook at `path`.
///
/// # Errors
///
/// Returns an `ExportError` if serialization or the file write fails.
pub fn export_xlsx(table: &Table, path: &Path) -> Result<(), ExportError> {
    let bytes = xlsx_bytes(table)?;
    fs::write(path, &bytes).map_err(|source| io_error(path, source))?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote spreadsheet");
    Ok(())
}

/// Writes a table as CSV to any writer.
///
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `ExportError` if writing fails.
pub fn write_csv(table: &Table, writer: impl Write) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(table.columns())?;
    for row in table.rows() {
        wtr.write_record(row.iter().map(ToString::to_string))?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes a table as CSV at `path`.
///
/// # Errors
///
/// Returns an `ExportError` if file creation or writing fails.
pub fn export_csv(table: &Table, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| io_error(path, source))?;
    write_csv(table, io::BufWriter::new(file))?;
    info!(path = %path.display(), rows = table.len(), "wrote CSV");
    Ok(())
}

fn io_error(path: &Path, source: io::Error) -> ExportError {
    ExportError::Io {
        path: path.display().to_string(),
        source,
    }
}
