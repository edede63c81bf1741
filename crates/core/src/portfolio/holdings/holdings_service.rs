use log::debug;
use std::sync::Arc;

use super::holdings_calculator::compute_holdings;
use super::holdings_model::{Holding, HoldingsFilter, LedgerSnapshot};
use crate::errors::Result;
use crate::prices::{collect_symbols, PriceProvider};
use crate::transactions::{Transaction, TransactionRepositoryTrait};

pub trait HoldingsServiceTrait: Send + Sync {
    /// Current holdings, optionally narrowed to one account and/or strategy.
    fn get_holdings(&self, filter: &HoldingsFilter) -> Result<Vec<Holding>>;

    /// Full ledger plus the holdings derived from that same read.
    fn get_snapshot(&self) -> Result<LedgerSnapshot>;
}

/// Reads the ledger, prices its symbols once and runs the aggregation.
pub struct HoldingsService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    price_provider: Arc<dyn PriceProvider>,
}

impl HoldingsService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        price_provider: Arc<dyn PriceProvider>,
    ) -> Self {
        Self {
            transaction_repository,
            price_provider,
        }
    }

    fn value(&self, transactions: &[Transaction]) -> Result<Vec<Holding>> {
        let symbols = collect_symbols(transactions);
        let prices = self.price_provider.lookup(&symbols);
        debug!(
            "Price provider '{}' resolved {} of {} symbols",
            self.price_provider.name(),
            prices.len(),
            symbols.len()
        );
        compute_holdings(transactions, &prices)
    }
}

impl HoldingsServiceTrait for HoldingsService {
    fn get_holdings(&self, filter: &HoldingsFilter) -> Result<Vec<Holding>> {
        let transactions = self.transaction_repository.fetch_all()?;
        let holdings: Vec<Holding> = self
            .value(&transactions)?
            .into_iter()
            .filter(|h| filter.matches(h))
            .collect();
        debug!(
            "Holdings for {:?}: {} positions from {} transactions",
            filter,
            holdings.len(),
            transactions.len()
        );
        Ok(holdings)
    }

    fn get_snapshot(&self) -> Result<LedgerSnapshot> {
        let transactions = self.transaction_repository.fetch_all()?;
        let holdings = self.value(&transactions)?;
        Ok(LedgerSnapshot {
            transactions,
            holdings,
        })
    }
}
