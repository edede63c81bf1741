use std::collections::HashMap;

use super::reports_model::{GroupDimension, PerformanceOrder, PerformerRow};
use super::{checked_total, share_pct};
use crate::errors::Result;
use crate::portfolio::holdings::Holding;

/// Top movers by P&L %, overall or per strategy/account.
///
/// The sort is stable, so equal percentages keep their input order. With a
/// dimension, the first `top_n` rows of each group are kept and the rows stay
/// in overall sorted order. Allocation is computed over the returned rows only.
pub fn top_performers(
    holdings: &[Holding],
    order: PerformanceOrder,
    group_by: Option<GroupDimension>,
    top_n: usize,
) -> Result<Vec<PerformerRow>> {
    let mut sorted: Vec<&Holding> = holdings.iter().collect();
    match order {
        PerformanceOrder::Winners => sorted.sort_by(|a, b| b.pnl_pct.cmp(&a.pnl_pct)),
        PerformanceOrder::Losers => sorted.sort_by(|a, b| a.pnl_pct.cmp(&b.pnl_pct)),
    }

    let selected: Vec<&Holding> = match group_by {
        None => sorted.into_iter().take(top_n).collect(),
        Some(dimension) => {
            let mut taken: HashMap<&str, usize> = HashMap::new();
            sorted
                .into_iter()
                .filter(|h| {
                    let count = taken.entry(dimension.key_of(*h)).or_insert(0);
                    *count += 1;
                    *count <= top_n
                })
                .collect()
        }
    };

    let subset_value = checked_total(selected.iter().map(|h| h.current_value), "performers")?;
    selected
        .into_iter()
        .map(|h| {
            Ok(PerformerRow {
                symbol: h.symbol.clone(),
                strategy: h.strategy.clone(),
                account_id: h.account_id.clone(),
                pnl_pct: h.pnl_pct,
                allocation_pct: share_pct(h.current_value, subset_value)?,
                investment: h.investment,
            })
        })
        .collect()
}
