//! Tabular CSV reading shared by uploads and price files.
//!
//! Auto-detects the delimiter, strips a UTF-8 BOM, skips blank lines and
//! pads/truncates every data row to the header width.

use csv::ReaderBuilder;
use log::warn;

use crate::errors::{Error, ValidationError};
use crate::Result;

/// A parsed sheet: trimmed headers plus rows aligned to them.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Delimiter actually used; `None` for workbook sheets.
    pub delimiter: Option<u8>,
}

impl Sheet {
    /// Takes the first non-blank record as the header. Later records are
    /// all kept, including ones whose cells are all empty (`,,`), so every
    /// data row can be reported on; only blank lines are skipped.
    pub(crate) fn from_records(records: Vec<Vec<String>>, delimiter: Option<u8>) -> Result<Self> {
        let mut records = records
            .into_iter()
            .skip_while(|row| row.iter().all(|cell| cell.is_empty()));
        let headers = records.next().ok_or_else(|| {
            Error::Validation(ValidationError::InvalidInput(
                "File is empty or contains no valid records".to_string(),
            ))
        })?;

        let width = headers.len();
        let rows = records
            .filter(|row| !is_blank_line(row))
            .enumerate()
            .map(|(idx, mut row)| {
                if row.len() > width {
                    warn!(
                        "Row {} has {} columns, expected {}. Extra columns ignored.",
                        idx,
                        row.len(),
                        width
                    );
                }
                row.resize(width, String::new());
                row
            })
            .collect();

        Ok(Self {
            headers,
            rows,
            delimiter,
        })
    }
}

/// A line holding nothing but whitespace parses as a single empty cell.
fn is_blank_line(row: &[String]) -> bool {
    row.len() <= 1 && row.iter().all(|cell| cell.is_empty())
}

/// Reads `content` as a CSV sheet with a header row.
///
/// `delimiter` forces a specific separator; `None` picks the best of
/// `,` `;` and tab by column consistency over the first lines.
pub fn read_sheet(content: &[u8], delimiter: Option<u8>) -> Result<Sheet> {
    let text = decode_content(content);
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&text));

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records: Vec<Vec<String>> = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        match result {
            Ok(record) => records.push(record.iter().map(|s| s.trim().to_string()).collect()),
            Err(e) => {
                warn!("Skipping unreadable CSV line {}: {}", idx + 1, e);
            }
        }
    }

    Sheet::from_records(records, Some(delimiter))
}

/// Decodes bytes to UTF-8, dropping a BOM and replacing invalid sequences.
fn decode_content(content: &[u8]) -> String {
    let without_bom = content.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(content);
    match std::str::from_utf8(without_bom) {
        Ok(s) => s.to_string(),
        Err(e) => {
            warn!(
                "Invalid UTF-8 encoding at byte {}. Some characters may be replaced.",
                e.valid_up_to()
            );
            String::from_utf8_lossy(without_bom).into_owned()
        }
    }
}

fn detect_delimiter(content: &str) -> u8 {
    let mut best = b',';
    let mut best_score = 0usize;
    for candidate in [b',', b';', b'\t'] {
        let score = score_delimiter(content, candidate as char);
        if score > best_score {
            best_score = score;
            best = candidate;
        }
    }
    best
}

/// Delimiters per line times the number of lines agreeing with the first one.
fn score_delimiter(content: &str, delimiter: char) -> usize {
    let counts: Vec<usize> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(10)
        .map(|line| line.matches(delimiter).count())
        .collect();

    match counts.first() {
        None | Some(0) => 0,
        Some(&first) => first * counts.iter().filter(|&&c| c == first).count(),
    }
}
