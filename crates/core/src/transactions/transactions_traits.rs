use async_trait::async_trait;

use super::import::{ImportSummary, UploadOptions};
use super::transactions_model::{NewTransaction, Transaction, TransactionInput};
use crate::Result;

/// Append-only ledger of buy/sell records.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Every stored transaction in insertion order.
    fn fetch_all(&self) -> Result<Vec<Transaction>>;
    fn fetch_by_account(&self, account_id: &str) -> Result<Vec<Transaction>>;
    /// Inserts one transaction atomically.
    async fn append(&self, new_transaction: NewTransaction) -> Result<Transaction>;
}

/// Trait defining the contract for transaction service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn get_transactions(&self) -> Result<Vec<Transaction>>;
    fn get_transactions_by_account(&self, account_id: &str) -> Result<Vec<Transaction>>;
    async fn create_transaction(&self, input: TransactionInput) -> Result<Transaction>;
    async fn import_file(
        &self,
        file_name: &str,
        content: &[u8],
        options: UploadOptions,
    ) -> Result<ImportSummary>;
}
