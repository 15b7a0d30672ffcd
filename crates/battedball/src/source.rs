//! Source spreadsheet decoding.
//!
//! The dataset is delivered as a spreadsheet. Workbook formats go through
//! `calamine`, `.csv` exports through `csv`. Either way the header row is
//! matched against [`COLUMNS`] by exact name; extra columns are ignored.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveDateTime;
use rusqlite::types::Value;
use tracing::{debug, warn};

use crate::error::SourceError;
use crate::types::{COLUMNS, ColumnKind};

/// Text layout of date cells read from a workbook.
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One source row, holding a value per entry in [`COLUMNS`].
pub(crate) type SourceRow = [Value; COLUMNS.len()];

/// Rows decoded from a source file.
#[derive(Debug, Default)]
pub(crate) struct SourceTable {
    pub rows: Vec<SourceRow>,
    /// Cells in numeric columns that held non-numeric text and were stored as NULL.
    pub coerced_cells: usize,
}

/// Read every row of the source file at `path`.
pub(crate) fn load(path: &Path) -> Result<SourceTable, SourceError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_workbook(path)?,
        other => {
            let shown = if other.is_empty() { "none" } else { other };
            return Err(SourceError::UnsupportedFormat(format!(
                "{} (extension: {shown})",
                path.display()
            )));
        }
    };

    if table.coerced_cells > 0 {
        warn!(
            path = %path.display(),
            cells = table.coerced_cells,
            "Non-numeric cells in numeric columns stored as NULL"
        );
    }
    debug!(path = %path.display(), rows = table.rows.len(), "Loaded source dataset");
    Ok(table)
}

/// Map each of [`COLUMNS`] to its position in the header row.
fn column_positions(header: &[&str]) -> Result<[usize; COLUMNS.len()], SourceError> {
    let mut positions = [0; COLUMNS.len()];
    for (slot, column) in positions.iter_mut().zip(COLUMNS) {
        *slot = header
            .iter()
            .position(|name| name.trim() == column)
            .ok_or(SourceError::MissingColumn(column))?;
    }
    Ok(positions)
}

fn load_csv(path: &Path) -> Result<SourceTable, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let header = reader.headers()?.clone();
    let positions = column_positions(&header.iter().collect::<Vec<_>>())?;

    let mut table = SourceTable::default();
    for record in reader.records() {
        let record = record?;
        let row = std::array::from_fn(|i| {
            let raw = record.get(positions[i]).unwrap_or("");
            text_cell(COLUMNS[i], raw, &mut table.coerced_cells)
        });
        table.rows.push(row);
    }
    Ok(table)
}

fn load_workbook(path: &Path) -> Result<SourceTable, SourceError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SourceError::NoWorksheet)??;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Err(SourceError::MissingColumn(COLUMNS[0]));
    };
    let header: Vec<String> = header.iter().map(ToString::to_string).collect();
    let positions = column_positions(&header.iter().map(String::as_str).collect::<Vec<_>>())?;

    let mut table = SourceTable::default();
    for cells in rows {
        let row = std::array::from_fn(|i| match cells.get(positions[i]) {
            Some(cell) => workbook_cell(COLUMNS[i], cell, &mut table.coerced_cells),
            None => Value::Null,
        });
        table.rows.push(row);
    }
    Ok(table)
}

/// Convert a text cell into a stored value for `column`.
fn text_cell(column: &str, raw: &str, coerced: &mut usize) -> Value {
    let raw = raw.trim();
    if raw.is_empty() {
        return Value::Null;
    }
    match ColumnKind::of(column) {
        Some(ColumnKind::Real) => match raw.parse::<f64>() {
            Ok(value) => Value::Real(value),
            Err(_) => {
                *coerced += 1;
                Value::Null
            }
        },
        _ => Value::Text(raw.to_string()),
    }
}

/// Convert a workbook cell into a stored value for `column`.
#[allow(clippy::cast_precision_loss)] // integral cells are far below 2^52
fn workbook_cell(column: &str, cell: &Data, coerced: &mut usize) -> Value {
    let kind = ColumnKind::of(column).unwrap_or(ColumnKind::Text);
    match (kind, cell) {
        (_, Data::Empty) => Value::Null,
        (ColumnKind::Real, Data::Float(value)) => Value::Real(*value),
        (ColumnKind::Real, Data::Int(value)) => Value::Real(*value as f64),
        (ColumnKind::Real, Data::String(text)) => text_cell(column, text, coerced),
        (ColumnKind::Real, _) => {
            *coerced += 1;
            Value::Null
        }
        (ColumnKind::Text, Data::String(text)) => text_cell(column, text, coerced),
        (ColumnKind::Text, Data::DateTime(date)) => match date.as_datetime() {
            Some(datetime) => Value::Text(format_date_time(&datetime)),
            None => Value::Text(cell.to_string()),
        },
        (ColumnKind::Text, other) => Value::Text(other.to_string()),
    }
}

fn format_date_time(datetime: &NaiveDateTime) -> String {
    datetime.format(DATE_TIME_FORMAT).to_string()
}
