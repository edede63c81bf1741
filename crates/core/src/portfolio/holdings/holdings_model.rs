use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identity of a position: one account, one strategy, one symbol.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub struct PositionKey {
    pub account_id: String,
    pub strategy: String,
    pub symbol: String,
}

/// An open long position with its cost basis and valuation.
///
/// Derived from the ledger on every request; never stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub account_id: String,
    pub strategy: String,
    pub symbol: String,

    /// Bought minus sold; always positive for a reported holding.
    pub net_quantity: i64,
    /// BUY-quantity weighted average entry price. Sells do not move it.
    pub average_price: Decimal,
    /// CMP from the price provider, zero when the symbol was not priced.
    pub current_price: Decimal,
    /// Whether the price provider returned a price for the symbol.
    pub price_resolved: bool,

    pub investment: Decimal,
    pub current_value: Decimal,
    pub pnl: Decimal,
    /// P&L as a percentage of investment, two decimals; zero without investment.
    pub pnl_pct: Decimal,
}

impl Holding {
    pub fn key(&self) -> PositionKey {
        PositionKey {
            account_id: self.account_id.clone(),
            strategy: self.strategy.clone(),
            symbol: self.symbol.clone(),
        }
    }
}

/// Optional narrowing of the holdings table.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsFilter {
    pub account_id: Option<String>,
    pub strategy: Option<String>,
}

impl HoldingsFilter {
    pub fn matches(&self, holding: &Holding) -> bool {
        self.account_id
            .as_deref()
            .map_or(true, |account| holding.account_id == account)
            && self
                .strategy
                .as_deref()
                .map_or(true, |strategy| holding.strategy == strategy)
    }
}

/// Ledger and the holdings computed from it at the same moment.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    pub transactions: Vec<crate::transactions::Transaction>,
    pub holdings: Vec<Holding>,
}
