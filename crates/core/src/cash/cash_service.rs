use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::info;
use rust_decimal::Decimal;

use crate::cash::cash_model::{CashBalance, CashEntry, NewCashEntry};
use crate::cash::cash_traits::{CashRepositoryTrait, CashServiceTrait};
use crate::errors::Result;
use crate::utils::time_utils::today;

pub struct CashService {
    cash_repository: Arc<dyn CashRepositoryTrait>,
}

impl CashService {
    pub fn new(cash_repository: Arc<dyn CashRepositoryTrait>) -> Self {
        Self { cash_repository }
    }
}

#[async_trait]
impl CashServiceTrait for CashService {
    fn get_entries(&self) -> Result<Vec<CashEntry>> {
        self.cash_repository.list()
    }

    fn get_balances(&self) -> Result<Vec<CashBalance>> {
        let mut balances: BTreeMap<String, Decimal> = BTreeMap::new();
        for entry in self.cash_repository.list()? {
            *balances.entry(entry.account_id).or_default() += entry.amount;
        }
        Ok(balances
            .into_iter()
            .map(|(account_id, balance)| CashBalance {
                account_id,
                balance,
            })
            .collect())
    }

    async fn record_entry(&self, entry: NewCashEntry) -> Result<CashEntry> {
        let mut entry = entry.validate()?;
        entry.date = Some(entry.date.unwrap_or_else(today));
        let created = self.cash_repository.append(entry).await?;
        info!(
            "Recorded cash movement of {} for {} on {}",
            created.amount, created.account_id, created.date
        );
        Ok(created)
    }
}
