//! Reads the first worksheet of an uploaded `.xlsx` workbook into a [`Sheet`].

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use log::debug;

use super::Sheet;
use crate::errors::{Error, ValidationError};
use crate::Result;

/// Datetime cells are rendered the way the trade-date parser expects them.
const CELL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Loads the first worksheet; header and row rules match [`super::read_sheet`].
pub fn read_workbook(content: &[u8]) -> Result<Sheet> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(content))?;
    let range = workbook.worksheet_range_at(0).ok_or_else(|| {
        Error::Validation(ValidationError::InvalidInput(
            "Workbook has no worksheets".to_string(),
        ))
    })??;

    debug!(
        "Read worksheet of {} rows x {} columns",
        range.height(),
        range.width()
    );

    let records = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    Sheet::from_records(records, None)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format(CELL_DATETIME_FORMAT).to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}
