//! Raw tabular file reading.
//!
//! The file extension selects the parser: `.csv` goes through the delimited
//! reader, `.xlsx` through the spreadsheet reader; anything else is rejected
//! before any bytes are read. Both parsers produce the same shape, a
//! [`RawTable`] of stringified cells with the header row still present (the
//! loader discards it).

use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use log::info;

use crate::error::{Result, RosterError};

/// A raw table: rows of stringified cells, header row included
pub type RawTable = Vec<Vec<String>>;

/// Read a tabular file, dispatching on its extension.
pub fn read_table(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(RosterError::unreadable(path, "file not found"));
    }
    if !path.is_file() {
        return Err(RosterError::unreadable(path, "path is not a file"));
    }

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let rows = match extension.as_str() {
        "csv" => read_csv(path)?,
        "xlsx" => read_xlsx(path)?,
        other => return Err(RosterError::UnsupportedFormat(other.to_string())),
    };

    info!("read {} raw rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Read a delimited text file into raw rows.
///
/// The reader is flexible about row widths; width validation against the
/// declared schema happens during binding, where a mismatch can name the
/// offending row.
fn read_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Read the first worksheet of an xlsx workbook into raw rows.
fn read_xlsx(path: &Path) -> Result<RawTable> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| RosterError::unreadable(path, "workbook has no worksheets"))??;

    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    Ok(rows)
}

/// Stringify a spreadsheet cell so both parsers feed the loader the same
/// shape. Date cells render in the day-first text-month format the date
/// coercion step expects.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.date().format("%d-%b-%Y").to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
    }
}
