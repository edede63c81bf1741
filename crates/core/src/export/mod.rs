//! Spreadsheet-style export of the ledger and holdings.

mod workbook;

#[cfg(test)]
mod workbook_tests;

pub use workbook::{export_workbook, HOLDINGS_SHEET, TRANSACTIONS_SHEET};
