use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::reports_model::{AllocatedHolding, GroupDimension, GroupSummary, PortfolioOverview};
use super::{checked_total, report_overflow, share_pct};
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::Result;
use crate::portfolio::holdings::Holding;

#[derive(Default)]
struct GroupTotals {
    pnl: Decimal,
    pnl_pct_sum: Decimal,
    members: usize,
    current_value: Decimal,
    investment: Decimal,
    net_quantity: i64,
}

impl GroupTotals {
    fn add(&mut self, holding: &Holding) -> Option<()> {
        self.pnl = self.pnl.checked_add(holding.pnl)?;
        self.pnl_pct_sum = self.pnl_pct_sum.checked_add(holding.pnl_pct)?;
        self.current_value = self.current_value.checked_add(holding.current_value)?;
        self.investment = self.investment.checked_add(holding.investment)?;
        self.net_quantity = self.net_quantity.checked_add(holding.net_quantity)?;
        self.members += 1;
        Some(())
    }
}

/// Per-strategy or per-account totals, sorted by group key.
pub fn group_summary(holdings: &[Holding], dimension: GroupDimension) -> Result<Vec<GroupSummary>> {
    let mut groups: BTreeMap<&str, GroupTotals> = BTreeMap::new();
    for holding in holdings {
        groups
            .entry(dimension.key_of(holding))
            .or_default()
            .add(holding)
            .ok_or_else(|| report_overflow("group summary"))?;
    }

    let total_value = checked_total(groups.values().map(|g| g.current_value), "group summary")?;
    groups
        .into_iter()
        .map(|(key, totals)| {
            Ok(GroupSummary {
                key: key.to_string(),
                pnl: totals.pnl,
                mean_pnl_pct: (totals.pnl_pct_sum / Decimal::from(totals.members))
                    .round_dp(DISPLAY_DECIMAL_PRECISION),
                current_value: totals.current_value,
                investment: totals.investment,
                net_quantity: totals.net_quantity,
                allocation_pct: share_pct(totals.current_value, total_value)?,
            })
        })
        .collect()
}

/// Whole-portfolio totals.
pub fn portfolio_overview(holdings: &[Holding]) -> Result<PortfolioOverview> {
    if holdings.is_empty() {
        return Ok(PortfolioOverview::default());
    }

    let total_investment = checked_total(holdings.iter().map(|h| h.investment), "overview")?;
    let current_value = checked_total(holdings.iter().map(|h| h.current_value), "overview")?;
    let pnl = checked_total(holdings.iter().map(|h| h.pnl), "overview")?;
    let total_quantity = checked_total(
        holdings.iter().map(|h| Decimal::from(h.net_quantity)),
        "overview",
    )?;
    let holdings_count = holdings.len();

    Ok(PortfolioOverview {
        total_investment,
        current_value,
        pnl,
        pnl_pct: share_pct(pnl, total_investment)?,
        holdings_count,
        average_holding_size: (total_quantity / Decimal::from(holdings_count))
            .round_dp(DISPLAY_DECIMAL_PRECISION),
    })
}

/// Every holding with its share of total current value.
pub fn with_allocation(holdings: &[Holding]) -> Result<Vec<AllocatedHolding>> {
    let total_value = checked_total(holdings.iter().map(|h| h.current_value), "allocation")?;
    holdings
        .iter()
        .map(|h| {
            Ok(AllocatedHolding {
                holding: h.clone(),
                allocation_pct: share_pct(h.current_value, total_value)?,
            })
        })
        .collect()
}
