use crate::cash::cash_model::{CashBalance, CashEntry, NewCashEntry};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for cash ledger repository operations
#[async_trait]
pub trait CashRepositoryTrait: Send + Sync {
    /// Entries ordered by date, then insertion.
    fn list(&self) -> Result<Vec<CashEntry>>;
    /// Stores a validated entry; `date` must already be set.
    async fn append(&self, entry: NewCashEntry) -> Result<CashEntry>;
}

/// Trait for cash ledger service operations
#[async_trait]
pub trait CashServiceTrait: Send + Sync {
    fn get_entries(&self) -> Result<Vec<CashEntry>>;
    fn get_balances(&self) -> Result<Vec<CashBalance>>;
    async fn record_entry(&self, entry: NewCashEntry) -> Result<CashEntry>;
}
