//! SQLite storage implementation for the cash ledger.

mod model;
mod repository;

pub use model::{CashEntryDB, NewCashEntryDB};
pub use repository::CashRepository;
