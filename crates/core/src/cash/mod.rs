//! Cash ledger - deposits and withdrawals per account.

mod cash_model;
mod cash_service;
mod cash_traits;


pub use cash_model::{CashBalance, CashEntry, NewCashEntry};
pub use cash_service::CashService;
pub use cash_traits::{CashRepositoryTrait, CashServiceTrait};
