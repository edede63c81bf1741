//! Property-based tests for the holdings aggregation engine.
//!
//! These tests check invariants that must hold for any well-formed ledger,
//! using the `proptest` crate for random test case generation.

use chrono::NaiveDate;
use dematfolio_core::portfolio::holdings::{compute_holdings, PositionKey};
use dematfolio_core::portfolio::reports::with_allocation;
use dematfolio_core::transactions::{Transaction, TransactionSide};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

// =============================================================================
// Generators
// =============================================================================

fn arb_side() -> impl Strategy<Value = TransactionSide> {
    prop_oneof![
        3 => Just(TransactionSide::Buy),
        2 => Just(TransactionSide::Sell),
    ]
}

/// Price between 0.01 and 10000.00.
fn arb_price() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_transaction() -> impl Strategy<Value = Transaction> {
    (
        prop::sample::select(vec!["Zerodha", "Groww"]),
        prop::sample::select(vec!["Long Term", "Swing"]),
        prop::sample::select(vec!["INFY", "TCS", "HDFC"]),
        1i64..1_000,
        arb_price(),
        arb_side(),
    )
        .prop_map(|(account, strategy, symbol, quantity, price, side)| {
            let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
            Transaction {
                id: 0,
                date,
                account_id: account.to_string(),
                symbol: symbol.to_string(),
                quantity,
                price,
                side,
                strategy: strategy.to_string(),
                created_at: date.and_hms_opt(0, 0, 0).unwrap(),
            }
        })
}

fn arb_ledger() -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec(arb_transaction(), 0..60).prop_map(|mut txs| {
        for (i, tx) in txs.iter_mut().enumerate() {
            tx.id = i as i32 + 1;
        }
        txs
    })
}

fn arb_prices() -> impl Strategy<Value = HashMap<String, Decimal>> {
    (
        proptest::option::of(arb_price()),
        proptest::option::of(arb_price()),
        proptest::option::of(arb_price()),
    )
        .prop_map(|(infy, tcs, hdfc)| {
            let mut prices = HashMap::new();
            for (symbol, price) in [("INFY", infy), ("TCS", tcs), ("HDFC", hdfc)] {
                if let Some(price) = price {
                    prices.insert(symbol.to_string(), price);
                }
            }
            prices
        })
}

fn key_of(tx: &Transaction) -> PositionKey {
    PositionKey {
        account_id: tx.account_id.clone(),
        strategy: tx.strategy.clone(),
        symbol: tx.symbol.clone(),
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Each reported holding carries exactly the signed sum of its group, and
    /// every group with a positive sum is reported.
    #[test]
    fn prop_net_quantity_matches_signed_sum(ledger in arb_ledger(), prices in arb_prices()) {
        let holdings = compute_holdings(&ledger, &prices).unwrap();

        let mut expected: BTreeMap<PositionKey, i64> = BTreeMap::new();
        for tx in &ledger {
            *expected.entry(key_of(tx)).or_default() += tx.signed_quantity();
        }
        let open: Vec<(PositionKey, i64)> = expected.into_iter().filter(|(_, q)| *q > 0).collect();
        let reported: Vec<(PositionKey, i64)> =
            holdings.iter().map(|h| (h.key(), h.net_quantity)).collect();

        prop_assert_eq!(reported, open);
    }

    #[test]
    fn prop_holdings_are_positive_and_sorted(ledger in arb_ledger(), prices in arb_prices()) {
        let holdings = compute_holdings(&ledger, &prices).unwrap();

        prop_assert!(holdings.iter().all(|h| h.net_quantity > 0));
        prop_assert!(holdings.windows(2).all(|w| w[0].key() < w[1].key()));
    }

    /// Average price lies within the range of the group's buy prices.
    #[test]
    fn prop_average_price_within_buy_range(ledger in arb_ledger()) {
        let holdings = compute_holdings(&ledger, &HashMap::new()).unwrap();

        for holding in &holdings {
            let buy_prices: Vec<Decimal> = ledger
                .iter()
                .filter(|tx| key_of(tx) == holding.key() && tx.side == TransactionSide::Buy)
                .map(|tx| tx.price)
                .collect();
            let min = buy_prices.iter().min().copied().unwrap();
            let max = buy_prices.iter().max().copied().unwrap();
            prop_assert!(holding.average_price >= min && holding.average_price <= max);
        }
    }

    #[test]
    fn prop_sell_prices_do_not_affect_output(
        ledger in arb_ledger(),
        prices in arb_prices(),
        replacement in arb_price(),
    ) {
        let repriced: Vec<Transaction> = ledger
            .iter()
            .cloned()
            .map(|mut tx| {
                if tx.side == TransactionSide::Sell {
                    tx.price = replacement;
                }
                tx
            })
            .collect();

        prop_assert_eq!(
            compute_holdings(&ledger, &prices).unwrap(),
            compute_holdings(&repriced, &prices).unwrap()
        );
    }

    #[test]
    fn prop_order_independent_and_repeatable(
        ledger in arb_ledger(),
        prices in arb_prices(),
        rotation in 0usize..60,
    ) {
        let baseline = compute_holdings(&ledger, &prices).unwrap();

        let mut shuffled = ledger.clone();
        shuffled.reverse();
        if !shuffled.is_empty() {
            let by = rotation % shuffled.len();
            shuffled.rotate_left(by);
        }

        prop_assert_eq!(&baseline, &compute_holdings(&shuffled, &prices).unwrap());
        prop_assert_eq!(&baseline, &compute_holdings(&ledger, &prices).unwrap());
    }

    #[test]
    fn prop_unpriced_symbols_flagged(ledger in arb_ledger(), prices in arb_prices()) {
        let holdings = compute_holdings(&ledger, &prices).unwrap();

        for holding in &holdings {
            prop_assert_eq!(holding.price_resolved, prices.contains_key(&holding.symbol));
            if !holding.price_resolved {
                prop_assert_eq!(holding.current_value, Decimal::ZERO);
            }
        }
    }

    /// Rounded allocations add up to 100 within half a hundredth per row.
    #[test]
    fn prop_allocation_sums_to_hundred(ledger in arb_ledger(), prices in arb_prices()) {
        let holdings = compute_holdings(&ledger, &prices).unwrap();
        let allocated = with_allocation(&holdings).unwrap();
        let total_value: Decimal = holdings.iter().map(|h| h.current_value).sum();
        let total_pct: Decimal = allocated.iter().map(|a| a.allocation_pct).sum();

        if total_value.is_zero() {
            prop_assert!(total_pct.is_zero());
        } else {
            let tolerance = Decimal::new(5, 3) * Decimal::from(allocated.len());
            prop_assert!((total_pct - Decimal::ONE_HUNDRED).abs() <= tolerance);
        }
    }
}
