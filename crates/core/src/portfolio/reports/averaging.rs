use rust_decimal::Decimal;

use super::report_overflow;
use super::reports_model::{AveragingCandidate, AveragingReport};
use crate::constants::{
    DISPLAY_DECIMAL_PRECISION, MAX_AVERAGING_THRESHOLD_PCT, MIN_AVERAGING_THRESHOLD_PCT,
};
use crate::errors::{Result, ValidationError};
use crate::portfolio::holdings::Holding;

/// Positions trading more than `threshold_pct` percent below their average cost.
///
/// A position qualifies when `current_price < average_price * (1 - t/100)`.
/// An unpriced position is judged at a CMP of zero, so it qualifies with a
/// 100% drop; `price_resolved` on the candidate tells the two cases apart.
pub fn averaging_candidates(holdings: &[Holding], threshold_pct: u32) -> Result<AveragingReport> {
    if !(MIN_AVERAGING_THRESHOLD_PCT..=MAX_AVERAGING_THRESHOLD_PCT).contains(&threshold_pct) {
        return Err(ValidationError::InvalidInput(format!(
            "Averaging threshold must be between {} and {} percent, got {}",
            MIN_AVERAGING_THRESHOLD_PCT, MAX_AVERAGING_THRESHOLD_PCT, threshold_pct
        ))
        .into());
    }

    let signal_ratio = Decimal::ONE - Decimal::from(threshold_pct) / Decimal::ONE_HUNDRED;
    let mut candidates = Vec::new();

    // CMP is never negative, so a qualifying position always has a positive average.
    for holding in holdings {
        let trigger = holding
            .average_price
            .checked_mul(signal_ratio)
            .ok_or_else(|| report_overflow("averaging"))?;
        if holding.current_price >= trigger {
            continue;
        }
        let drop = holding
            .average_price
            .checked_sub(holding.current_price)
            .and_then(|gap| gap.checked_div(holding.average_price))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(|| report_overflow("averaging"))?;
        candidates.push(AveragingCandidate {
            account_id: holding.account_id.clone(),
            strategy: holding.strategy.clone(),
            symbol: holding.symbol.clone(),
            current_price: holding.current_price,
            price_resolved: holding.price_resolved,
            average_price: holding.average_price,
            cmp_drop_pct: drop.round_dp(DISPLAY_DECIMAL_PRECISION),
            pnl_pct: holding.pnl_pct,
            investment: holding.investment,
        });
    }

    Ok(AveragingReport {
        threshold_pct,
        signal_ratio,
        candidates,
    })
}
