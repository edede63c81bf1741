//! Transactions module - ledger models, upload parsing, services, and traits.

mod import;
mod transactions_model;
mod transactions_service;
mod transactions_traits;

#[cfg(test)]
mod import_tests;

pub use import::{
    parse_price, parse_quantity, prepare_rows, row_error_message, ColumnMapping, FieldAliases,
    FileFormat, ImportError, ImportSummary, RowError, UploadField, UploadKind, UploadOptions,
};
pub use transactions_model::{NewTransaction, Transaction, TransactionInput, TransactionSide};
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
