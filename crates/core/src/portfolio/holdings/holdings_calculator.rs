use std::collections::{BTreeMap, HashMap};

use log::debug;
use rust_decimal::Decimal;

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{CalculatorError, Result};
use crate::portfolio::holdings::{Holding, PositionKey};
use crate::transactions::{Transaction, TransactionSide};

/// Running sums for one (account, strategy, symbol) group.
#[derive(Debug, Default, Clone)]
struct PositionAccumulator {
    net_quantity: i64,
    buy_quantity: i64,
    buy_cost: Decimal,
}

impl PositionAccumulator {
    /// Folds one transaction in. Returns `None` on arithmetic overflow.
    fn apply(&mut self, transaction: &Transaction) -> Option<()> {
        self.net_quantity = self
            .net_quantity
            .checked_add(transaction.signed_quantity())?;

        if transaction.side == TransactionSide::Buy {
            self.buy_quantity = self.buy_quantity.checked_add(transaction.quantity)?;
            let cost = Decimal::from(transaction.quantity).checked_mul(transaction.price)?;
            self.buy_cost = self.buy_cost.checked_add(cost)?;
        }
        Some(())
    }

    /// Zero when nothing was bought (a group made only of sells).
    fn average_price(&self) -> Option<Decimal> {
        if self.buy_quantity == 0 {
            return Some(Decimal::ZERO);
        }
        self.buy_cost.checked_div(Decimal::from(self.buy_quantity))
    }
}

/// Builds the holdings table from the full ledger and a price snapshot.
///
/// Transactions are grouped by (account, strategy, symbol); the order of the
/// input does not matter. Groups whose net quantity is zero or negative are
/// dropped. Symbols missing from `prices` are valued at zero. The result is
/// sorted by account, then strategy, then symbol.
///
/// Fails only when a transaction is malformed (non-positive quantity or
/// price) or a running sum overflows.
pub fn compute_holdings(
    transactions: &[Transaction],
    prices: &HashMap<String, Decimal>,
) -> Result<Vec<Holding>> {
    let mut positions: BTreeMap<PositionKey, PositionAccumulator> = BTreeMap::new();

    for transaction in transactions {
        check_shape(transaction)?;
        let key = PositionKey {
            account_id: transaction.account_id.clone(),
            strategy: transaction.strategy.clone(),
            symbol: transaction.symbol.clone(),
        };
        let accumulator = positions.entry(key).or_default();
        if accumulator.apply(transaction).is_none() {
            return Err(overflow(PositionKey {
                account_id: transaction.account_id.clone(),
                strategy: transaction.strategy.clone(),
                symbol: transaction.symbol.clone(),
            }));
        }
    }

    let group_count = positions.len();
    let holdings = positions
        .into_iter()
        .filter(|(_, acc)| acc.net_quantity > 0)
        .map(|(key, acc)| value_position(key, &acc, prices))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "Aggregated {} transactions into {} groups, {} open holdings",
        transactions.len(),
        group_count,
        holdings.len()
    );
    Ok(holdings)
}

fn check_shape(transaction: &Transaction) -> Result<()> {
    let reason = if transaction.quantity <= 0 {
        format!("quantity must be positive, got {}", transaction.quantity)
    } else if transaction.price <= Decimal::ZERO {
        format!("price must be positive, got {}", transaction.price)
    } else {
        return Ok(());
    };
    Err(CalculatorError::InvalidTransaction {
        transaction_id: transaction.id,
        reason,
    }
    .into())
}

fn overflow(key: PositionKey) -> crate::Error {
    CalculatorError::Overflow {
        account_id: key.account_id,
        strategy: key.strategy,
        symbol: key.symbol,
    }
    .into()
}

fn value_position(
    key: PositionKey,
    acc: &PositionAccumulator,
    prices: &HashMap<String, Decimal>,
) -> Result<Holding> {
    let metrics = (|| {
        let net_quantity = Decimal::from(acc.net_quantity);
        let average_price = acc.average_price()?;
        let current_price = prices.get(&key.symbol).copied();
        let investment = net_quantity.checked_mul(average_price)?;
        let current_value = net_quantity.checked_mul(current_price.unwrap_or(Decimal::ZERO))?;
        let pnl = current_value.checked_sub(investment)?;
        let pnl_pct = percent_of(pnl, investment)?;
        Some((
            average_price,
            current_price,
            investment,
            current_value,
            pnl,
            pnl_pct,
        ))
    })();

    let Some((average_price, current_price, investment, current_value, pnl, pnl_pct)) = metrics
    else {
        return Err(overflow(key));
    };

    Ok(Holding {
        account_id: key.account_id,
        strategy: key.strategy,
        symbol: key.symbol,
        net_quantity: acc.net_quantity,
        average_price,
        current_price: current_price.unwrap_or(Decimal::ZERO),
        price_resolved: current_price.is_some(),
        investment,
        current_value,
        pnl,
        pnl_pct,
    })
}

/// `part / whole * 100` rounded for display; zero when `whole` is zero.
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        return Some(Decimal::ZERO);
    }
    let pct = part
        .checked_div(whole)?
        .checked_mul(Decimal::ONE_HUNDRED)?;
    Some(pct.round_dp(DISPLAY_DECIMAL_PRECISION))
}
