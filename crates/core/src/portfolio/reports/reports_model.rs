use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::portfolio::holdings::Holding;

/// Direction of a performer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceOrder {
    /// Highest P&L % first.
    Winners,
    /// Lowest P&L % first.
    Losers,
}

impl FromStr for PerformanceOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "winners" => Ok(PerformanceOrder::Winners),
            "losers" => Ok(PerformanceOrder::Losers),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown order '{}' (expected winners or losers)",
                other
            ))),
        }
    }
}

/// Holding attribute used to bucket reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupDimension {
    Strategy,
    #[serde(alias = "demat")]
    Account,
}

impl GroupDimension {
    pub fn key_of<'a>(&self, holding: &'a Holding) -> &'a str {
        match self {
            GroupDimension::Strategy => &holding.strategy,
            GroupDimension::Account => &holding.account_id,
        }
    }
}

impl FromStr for GroupDimension {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strategy" => Ok(GroupDimension::Strategy),
            "account" | "demat" => Ok(GroupDimension::Account),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown grouping '{}' (expected strategy or account)",
                other
            ))),
        }
    }
}

/// One line of a winners/losers table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformerRow {
    pub symbol: String,
    pub strategy: String,
    pub account_id: String,
    pub pnl_pct: Decimal,
    /// Share of the rows shown in the same table, not of the whole portfolio.
    pub allocation_pct: Decimal,
    pub investment: Decimal,
}

/// Aggregates of every holding sharing one strategy or account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub key: String,
    pub pnl: Decimal,
    /// Unweighted mean of member P&L percentages.
    pub mean_pnl_pct: Decimal,
    pub current_value: Decimal,
    pub investment: Decimal,
    pub net_quantity: i64,
    pub allocation_pct: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioOverview {
    pub total_investment: Decimal,
    pub current_value: Decimal,
    pub pnl: Decimal,
    pub pnl_pct: Decimal,
    pub holdings_count: usize,
    /// Mean net quantity per holding.
    pub average_holding_size: Decimal,
}

/// A holding with its share of the whole portfolio's current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocatedHolding {
    #[serde(flatten)]
    pub holding: Holding,
    pub allocation_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AveragingCandidate {
    pub account_id: String,
    pub strategy: String,
    pub symbol: String,
    /// Zero when the symbol was not priced.
    pub current_price: Decimal,
    pub price_resolved: bool,
    pub average_price: Decimal,
    /// How far CMP sits below the average price, in percent.
    pub cmp_drop_pct: Decimal,
    pub pnl_pct: Decimal,
    pub investment: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AveragingReport {
    pub threshold_pct: u32,
    /// CMP must be below `average_price * signal_ratio` to qualify.
    pub signal_ratio: Decimal,
    pub candidates: Vec<AveragingCandidate>,
}
