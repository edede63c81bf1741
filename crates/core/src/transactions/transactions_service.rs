use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;

use super::import::{
    prepare_rows, row_error_message, ColumnMapping, FileFormat, ImportSummary, RowError,
    UploadOptions,
};
use super::transactions_model::{Transaction, TransactionInput};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::utils::{read_sheet, read_workbook};
use crate::utils::time_utils::today;
use crate::Result;

/// Service for recording transactions, one at a time or from uploaded files.
pub struct TransactionService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(transaction_repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        Self {
            transaction_repository,
        }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn get_transactions(&self) -> Result<Vec<Transaction>> {
        self.transaction_repository.fetch_all()
    }

    fn get_transactions_by_account(&self, account_id: &str) -> Result<Vec<Transaction>> {
        self.transaction_repository.fetch_by_account(account_id)
    }

    async fn create_transaction(&self, input: TransactionInput) -> Result<Transaction> {
        let new_transaction = input.into_new_transaction(today())?;
        let created = self.transaction_repository.append(new_transaction).await?;
        info!(
            "Recorded {} {} x{} @ {} in {}/{}",
            created.side,
            created.symbol,
            created.quantity,
            created.price,
            created.account_id,
            created.strategy
        );
        Ok(created)
    }

    async fn import_file(
        &self,
        file_name: &str,
        content: &[u8],
        options: UploadOptions,
    ) -> Result<ImportSummary> {
        let format = FileFormat::from_file_name(file_name)?;
        options.validate()?;

        let sheet = match format {
            FileFormat::Csv => read_sheet(content, None)?,
            FileFormat::Xlsx => read_workbook(content)?,
        };
        let mapping = ColumnMapping::resolve(&sheet.headers, options.kind, format)?;
        debug!(
            "Uploading {} ({} rows) as {:?} with columns {:?}",
            file_name,
            sheet.rows.len(),
            options.kind,
            mapping
        );

        let mut summary = ImportSummary::default();
        for (row, prepared) in prepare_rows(&sheet, &mapping, &options) {
            let outcome = match prepared {
                Ok(new_transaction) => self.transaction_repository.append(new_transaction).await,
                Err(e) => Err(e),
            };
            match outcome {
                Ok(_) => summary.success_count += 1,
                Err(e) => {
                    let row_error = RowError::new(row, row_error_message(&e));
                    warn!("Upload of {} skipped a row. {}", file_name, row_error);
                    summary.errors.push(row_error);
                }
            }
        }

        info!(
            "Upload of {} finished: {} stored, {} failed",
            file_name,
            summary.success_count,
            summary.errors.len()
        );
        Ok(summary)
    }
}
