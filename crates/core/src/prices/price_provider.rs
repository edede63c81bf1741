use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Mutex;

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::errors::{Error, ValidationError};
use crate::transactions::{parse_price, Transaction};
use crate::utils::read_sheet;
use crate::Result;

/// Synchronous source of current market prices (CMP).
///
/// Symbols the provider cannot price are left out of the returned map; a
/// missing price is never an error.
pub trait PriceProvider: Send + Sync {
    fn lookup(&self, symbols: &BTreeSet<String>) -> HashMap<String, Decimal>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}

/// Distinct symbols appearing in a ledger.
pub fn collect_symbols(transactions: &[Transaction]) -> BTreeSet<String> {
    transactions.iter().map(|t| t.symbol.clone()).collect()
}

/// Provider that never resolves a price.
#[derive(Debug, Default, Clone)]
pub struct NoPriceProvider;

impl PriceProvider for NoPriceProvider {
    fn lookup(&self, _symbols: &BTreeSet<String>) -> HashMap<String, Decimal> {
        HashMap::new()
    }

    fn name(&self) -> &str {
        "none"
    }
}

/// Fixed price table, typically loaded from a `symbol,price` CSV file.
#[derive(Debug, Default, Clone)]
pub struct StaticPriceProvider {
    prices: HashMap<String, Decimal>,
}

impl StaticPriceProvider {
    pub fn new(prices: HashMap<String, Decimal>) -> Self {
        Self { prices }
    }

    /// Parses a price table. The first column is the symbol and the second the
    /// price; rows with an unparseable or non-positive price are skipped.
    pub fn from_csv(content: &[u8]) -> Result<Self> {
        let sheet = read_sheet(content, None)?;
        if sheet.headers.len() < 2 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Price file needs a symbol column and a price column".to_string(),
            )));
        }

        let mut prices = HashMap::new();
        for (idx, row) in sheet.rows.iter().enumerate() {
            let symbol = row[0].trim();
            match parse_price(&row[1]) {
                Ok(price) if price > Decimal::ZERO && !symbol.is_empty() => {
                    prices.insert(symbol.to_string(), price);
                }
                _ => warn!("Ignoring price row {}: {:?}", idx, row),
            }
        }
        debug!("Loaded {} static prices", prices.len());
        Ok(Self { prices })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read(path.as_ref()).map_err(|e| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Cannot read price file {}: {}",
                path.as_ref().display(),
                e
            )))
        })?;
        Self::from_csv(&content)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl PriceProvider for StaticPriceProvider {
    fn lookup(&self, symbols: &BTreeSet<String>) -> HashMap<String, Decimal> {
        symbols
            .iter()
            .filter_map(|s| self.prices.get(s).map(|p| (s.clone(), *p)))
            .collect()
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Stub market feed: a uniformly random price in [100, 2000) per symbol on
/// every lookup, rounded to paise.
pub struct MockPriceProvider {
    rng: Mutex<StdRng>,
}

impl MockPriceProvider {
    const MIN_PRICE: f64 = 100.0;
    const MAX_PRICE: f64 = 2000.0;

    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic sequence of prices, for reproducible demos and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for MockPriceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceProvider for MockPriceProvider {
    fn lookup(&self, symbols: &BTreeSet<String>) -> HashMap<String, Decimal> {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        symbols
            .iter()
            .filter_map(|s| {
                let raw = rng.gen_range(Self::MIN_PRICE..Self::MAX_PRICE);
                Decimal::from_f64(raw).map(|p| (s.clone(), p.round_dp(2)))
            })
            .collect()
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn symbols(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_static_provider_omits_unknown_symbols() {
        let provider = StaticPriceProvider::new(HashMap::from([
            ("INFY".to_string(), dec!(1500)),
            ("TCS".to_string(), dec!(3400)),
        ]));

        let prices = provider.lookup(&symbols(&["INFY", "UNKNOWN"]));

        assert_eq!(prices.len(), 1);
        assert_eq!(prices["INFY"], dec!(1500));
    }

    #[test]
    fn test_static_provider_from_csv_skips_bad_rows() {
        let provider =
            StaticPriceProvider::from_csv(b"symbol,price\nINFY,1500.25\nTCS,abc\nHDFC,0\nITC,410")
                .unwrap();

        assert_eq!(provider.len(), 2);
        let prices = provider.lookup(&symbols(&["INFY", "TCS", "HDFC", "ITC"]));
        assert_eq!(prices["INFY"], dec!(1500.25));
        assert_eq!(prices["ITC"], dec!(410));
    }

    #[test]
    fn test_static_provider_needs_two_columns() {
        assert!(StaticPriceProvider::from_csv(b"symbol\nINFY").is_err());
    }

    #[test]
    fn test_mock_provider_prices_every_symbol_in_range() {
        let provider = MockPriceProvider::seeded(7);
        let prices = provider.lookup(&symbols(&["A", "B", "C"]));

        assert_eq!(prices.len(), 3);
        for price in prices.values() {
            assert!(*price >= dec!(100) && *price <= dec!(2000));
        }
    }

    #[test]
    fn test_seeded_mock_provider_is_reproducible() {
        let a = MockPriceProvider::seeded(42).lookup(&symbols(&["X", "Y"]));
        let b = MockPriceProvider::seeded(42).lookup(&symbols(&["X", "Y"]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_price_provider_resolves_nothing() {
        assert!(NoPriceProvider.lookup(&symbols(&["INFY"])).is_empty());
    }
}
