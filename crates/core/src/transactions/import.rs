//! Bulk upload of broker exports.
//!
//! Column names differ between brokers, so every field has an ordered alias
//! list. Aliases are resolved once against the header; a file missing a
//! required field is rejected before any row is read. Each row then becomes
//! either one `NewTransaction` or one row-level error.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_ACCOUNT_ID, DEFAULT_HOLDINGS_STRATEGY, DEFAULT_TRADES_STRATEGY};
use crate::errors::{Error, ValidationError};
use crate::transactions::{NewTransaction, TransactionSide};
use crate::utils::time_utils::parse_trade_date;
use crate::utils::Sheet;
use crate::Result;

/// Upload failures that stop the whole batch before row processing.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Unsupported file format '{0}' (expected a .csv or .xlsx file)")]
    UnsupportedFormat(String),

    #[error("Could not read workbook: {0}")]
    UnreadableWorkbook(String),

    #[error("Could not find a column for: {}", .0.join(", "))]
    UnresolvedColumns(Vec<String>),
}

/// What the uploaded file describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    /// A broker holdings statement; every row is booked as a BUY at its average cost.
    Holdings,
    /// A daily trade log with optional side and date columns.
    Trades,
}

impl UploadKind {
    pub fn default_strategy(&self) -> &'static str {
        match self {
            UploadKind::Holdings => DEFAULT_HOLDINGS_STRATEGY,
            UploadKind::Trades => DEFAULT_TRADES_STRATEGY,
        }
    }

    /// Ordered aliases per field. Broker holdings statements name their
    /// columns differently in the CSV and the Excel download.
    pub fn aliases(&self, format: FileFormat) -> &'static [FieldAliases] {
        match (self, format) {
            (UploadKind::Holdings, FileFormat::Csv) => HOLDINGS_CSV_ALIASES,
            (UploadKind::Holdings, FileFormat::Xlsx) => HOLDINGS_XLSX_ALIASES,
            (UploadKind::Trades, _) => TRADES_ALIASES,
        }
    }
}

impl FromStr for UploadKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "holdings" => Ok(UploadKind::Holdings),
            "trades" => Ok(UploadKind::Trades),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown upload kind '{}' (expected holdings or trades)",
                other
            ))),
        }
    }
}

/// File formats accepted by the upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xlsx,
}

impl FileFormat {
    pub fn from_file_name(file_name: &str) -> std::result::Result<Self, ImportError> {
        let lower = file_name.trim().to_ascii_lowercase();
        if lower.ends_with(".csv") {
            Ok(FileFormat::Csv)
        } else if lower.ends_with(".xlsx") {
            Ok(FileFormat::Xlsx)
        } else {
            Err(ImportError::UnsupportedFormat(file_name.to_string()))
        }
    }
}

/// Per-upload settings applied to every row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOptions {
    pub kind: UploadKind,
    pub account_id: String,
    pub strategy: String,
    /// Trade date for rows that carry none (always used for holdings).
    pub default_date: NaiveDate,
}

impl UploadOptions {
    /// Options with the usual account and the kind's default strategy.
    pub fn new(kind: UploadKind, default_date: NaiveDate) -> Self {
        Self {
            kind,
            account_id: DEFAULT_ACCOUNT_ID.to_string(),
            strategy: kind.default_strategy().to_string(),
            default_date,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.account_id.trim().is_empty() {
            return Err(ValidationError::MissingField("accountId".to_string()).into());
        }
        if self.strategy.trim().is_empty() {
            return Err(ValidationError::MissingField("strategy".to_string()).into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadField {
    Symbol,
    Quantity,
    Price,
    Side,
    Date,
}

impl UploadField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadField::Symbol => "symbol",
            UploadField::Quantity => "quantity",
            UploadField::Price => "price",
            UploadField::Side => "side",
            UploadField::Date => "date",
        }
    }
}

/// Candidate header names for one field, most specific first.
#[derive(Debug, Clone, Copy)]
pub struct FieldAliases {
    pub field: UploadField,
    pub aliases: &'static [&'static str],
    pub required: bool,
}

const HOLDINGS_CSV_ALIASES: &[FieldAliases] = &[
    FieldAliases {
        field: UploadField::Symbol,
        aliases: &["Instrument", "Name", "symbol", "Symbol"],
        required: true,
    },
    FieldAliases {
        field: UploadField::Quantity,
        aliases: &["Qty.", "Qty", "quantity"],
        required: true,
    },
    FieldAliases {
        field: UploadField::Price,
        aliases: &["Avg. cost", "Avg.", "ATP", "avg_price", "Price"],
        required: true,
    },
];

const HOLDINGS_XLSX_ALIASES: &[FieldAliases] = &[
    FieldAliases {
        field: UploadField::Symbol,
        aliases: &["Company Name", "Name", "Instrument", "symbol", "Symbol"],
        required: true,
    },
    FieldAliases {
        field: UploadField::Quantity,
        aliases: &["Total Quantity", "Qty", "Qty.", "quantity"],
        required: true,
    },
    FieldAliases {
        field: UploadField::Price,
        aliases: &[
            "Avg Trading Price",
            "ATP",
            "Avg.",
            "Avg. cost",
            "Price",
            "avg_price",
        ],
        required: true,
    },
];

const TRADES_ALIASES: &[FieldAliases] = &[
    FieldAliases {
        field: UploadField::Symbol,
        aliases: &["Symbol", "symbol"],
        required: true,
    },
    FieldAliases {
        field: UploadField::Quantity,
        aliases: &["Qty", "quantity"],
        required: true,
    },
    FieldAliases {
        field: UploadField::Price,
        aliases: &["Price", "price"],
        required: true,
    },
    FieldAliases {
        field: UploadField::Side,
        aliases: &["Side", "side"],
        required: false,
    },
    FieldAliases {
        field: UploadField::Date,
        aliases: &["Date", "date"],
        required: false,
    },
];

/// Column positions resolved from a sheet header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub symbol: usize,
    pub quantity: usize,
    pub price: usize,
    pub side: Option<usize>,
    pub date: Option<usize>,
}

impl ColumnMapping {
    /// Picks, for every field, the first alias present in `headers`.
    ///
    /// All unresolved required fields are reported together.
    pub fn resolve(
        headers: &[String],
        kind: UploadKind,
        format: FileFormat,
    ) -> std::result::Result<Self, ImportError> {
        let find = |entry: &FieldAliases| {
            entry
                .aliases
                .iter()
                .find_map(|alias| headers.iter().position(|h| h == alias))
        };

        let mut symbol = None;
        let mut quantity = None;
        let mut price = None;
        let mut side = None;
        let mut date = None;
        let mut missing = Vec::new();

        for entry in kind.aliases(format) {
            let index = find(entry);
            if index.is_none() && entry.required {
                missing.push(entry.field.as_str().to_string());
            }
            match entry.field {
                UploadField::Symbol => symbol = index,
                UploadField::Quantity => quantity = index,
                UploadField::Price => price = index,
                UploadField::Side => side = index,
                UploadField::Date => date = index,
            }
        }

        match (symbol, quantity, price) {
            (Some(symbol), Some(quantity), Some(price)) if missing.is_empty() => Ok(Self {
                symbol,
                quantity,
                price,
                side,
                date,
            }),
            _ => Err(ImportError::UnresolvedColumns(missing)),
        }
    }
}

/// A row that could not be turned into a stored transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    /// Zero-based index of the data row (header excluded).
    pub row: usize,
    pub message: String,
}

impl RowError {
    pub fn new(row: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}: {}", self.row, self.message)
    }
}

/// Outcome of a bulk upload. Partial success is normal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub success_count: usize,
    pub errors: Vec<RowError>,
}

/// Parses an integer share count.
///
/// Accepts thousands separators, integral decimals ("10.0") and annotated
/// counts such as "12 Shares".
pub fn parse_quantity(raw: &str) -> Result<i64> {
    let mut value = raw.trim();
    if value.to_ascii_lowercase().contains("share") {
        value = value.split_whitespace().next().unwrap_or_default();
    }
    let cleaned = value.replace(',', "");

    if let Ok(qty) = cleaned.parse::<i64>() {
        return Ok(qty);
    }
    match Decimal::from_str(&cleaned) {
        Ok(d) if d.fract().is_zero() => i64::try_from(d).map_err(|_| invalid_number("quantity", raw)),
        _ => Err(invalid_number("quantity", raw)),
    }
}

/// Parses a price cell, tolerating thousands separators and scientific notation.
pub fn parse_price(raw: &str) -> Result<Decimal> {
    let cleaned = raw.trim().replace(',', "");
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| invalid_number("price", raw))
}

fn invalid_number(field: &str, raw: &str) -> Error {
    Error::Validation(ValidationError::InvalidInput(format!(
        "Invalid {} '{}'",
        field, raw
    )))
}

/// Converts every data row into a validated transaction or an error message.
///
/// The returned vector has one entry per row, in file order.
pub fn prepare_rows(
    sheet: &Sheet,
    mapping: &ColumnMapping,
    options: &UploadOptions,
) -> Vec<(usize, Result<NewTransaction>)> {
    sheet
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| (idx, prepare_row(row, mapping, options)))
        .collect()
}

fn prepare_row(
    row: &[String],
    mapping: &ColumnMapping,
    options: &UploadOptions,
) -> Result<NewTransaction> {
    let cell = |index: usize| row.get(index).map(|s| s.trim()).unwrap_or_default();
    let optional_cell = |index: Option<usize>| index.map(cell).filter(|s| !s.is_empty());

    let symbol = cell(mapping.symbol);
    let quantity_raw = cell(mapping.quantity);
    let price_raw = cell(mapping.price);
    if symbol.is_empty() || quantity_raw.is_empty() || price_raw.is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Missing required fields.".to_string(),
        )));
    }

    let quantity = parse_quantity(quantity_raw)?;
    let price = parse_price(price_raw)?;

    let (side, date) = match options.kind {
        UploadKind::Holdings => (TransactionSide::Buy, options.default_date),
        UploadKind::Trades => {
            let side = match optional_cell(mapping.side) {
                Some(raw) => TransactionSide::from_str(raw)?,
                None => TransactionSide::Buy,
            };
            let date = match optional_cell(mapping.date) {
                Some(raw) => parse_trade_date(raw).ok_or_else(|| {
                    Error::Validation(ValidationError::InvalidInput(format!(
                        "Invalid date '{}'",
                        raw
                    )))
                })?,
                None => options.default_date,
            };
            (side, date)
        }
    };

    NewTransaction {
        date,
        account_id: options.account_id.clone(),
        symbol: symbol.to_string(),
        quantity,
        price,
        side,
        strategy: options.strategy.clone(),
    }
    .validate()
}

/// Message recorded against a failed row, without the error-kind prefix.
pub fn row_error_message(err: &Error) -> String {
    match err {
        Error::Validation(ValidationError::InvalidInput(message)) => message.clone(),
        Error::Validation(other) => other.to_string(),
        other => other.to_string(),
    }
}
