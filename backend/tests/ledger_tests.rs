//! Bulk transaction planner tests
//!
//! Tests for planning bulk buys and sells: line resolution, the
//! available-stock invariant, all-or-nothing failure, and the aggregate
//! delta mirroring the sum of the line deltas.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use shared::convert::round_money;
use shared::ledger::{plan_bulk, LineRequest, PlanError};
use shared::models::Item;
use shared::types::{Direction, AGGREGATE_PROFILE};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Build a stock item with factors 1 / lpp / 1 so qty == lengths and
/// packs == lengths / lpp.
fn item(profile: &str, code: &str, lpp: &str, qty: &str, rate: &str) -> Item {
    let now = Utc::now();
    let qty_d = dec(qty);
    let lpp_d = dec(lpp);
    Item {
        id: Uuid::new_v4(),
        profile: Some(profile.to_string()),
        s_no: None,
        hsn_code: Some("7604".to_string()),
        code: Some(code.to_string()),
        description: None,
        weight_per_meter: Decimal::ONE,
        profile_length: Decimal::ONE,
        length_per_pack: lpp_d,
        packs: qty_d / lpp_d,
        lengths: qty_d,
        qty: qty_d,
        rate: dec(rate),
        amount: round_money(qty_d * dec(rate)),
        created_at: now,
        updated_at: now,
    }
}

fn sell_line(profile: &str, qty: &str) -> LineRequest {
    LineRequest {
        profile: Some(profile.to_string()),
        code: None,
        packs: None,
        lengths: None,
        qty: Some(dec(qty)),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Selling 40 kg from 100 kg at rate 5 with 10 lengths per pack
    #[test]
    fn test_sell_single_line() {
        let items = vec![item("A", "A1", "10", "100", "5")];
        let plan = plan_bulk(&items, &[sell_line("A", "40")], Direction::Sell).unwrap();

        assert_eq!(plan.deltas.len(), 1);
        let delta = &plan.deltas[0];
        assert_eq!(delta.qty, dec("-40"));
        assert_eq!(delta.lengths, dec("-40"));
        assert_eq!(delta.packs, dec("-4"));
        assert_eq!(delta.amount, dec("-200.00"));
        assert_eq!(plan.total_amount, dec("200.00"));
    }

    /// Line snapshots record positive quantities for both directions
    #[test]
    fn test_line_snapshot_quantities_positive() {
        let items = vec![item("A", "A1", "10", "100", "5")];
        for direction in [Direction::Sell, Direction::Buy] {
            let plan = plan_bulk(&items, &[sell_line("A", "40")], direction).unwrap();
            let line = &plan.lines[0];
            assert_eq!(line.sold_qty, dec("40"));
            assert_eq!(line.sold_packs, dec("4"));
            assert_eq!(line.sold_amount, dec("200.00"));
        }
    }

    /// Buys add stock, no sufficiency check even from zero
    #[test]
    fn test_buy_from_empty_stock() {
        let items = vec![item("A", "A1", "10", "0", "5")];
        let plan = plan_bulk(&items, &[sell_line("A", "40")], Direction::Buy).unwrap();

        assert_eq!(plan.deltas[0].qty, dec("40"));
        assert_eq!(plan.deltas[0].packs, dec("4"));
    }

    /// Selling more than available fails with the full unit comparison
    #[test]
    fn test_insufficient_stock() {
        let items = vec![item("A", "A1", "10", "60", "5")];
        let err = plan_bulk(&items, &[sell_line("A", "1000")], Direction::Sell).unwrap_err();

        match err {
            PlanError::InsufficientStock {
                item,
                available,
                required,
            } => {
                assert_eq!(item, "A");
                assert_eq!(available.qty, dec("60"));
                assert_eq!(required.qty, dec("1000"));
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
    }

    /// An unknown line anywhere in the batch aborts the whole plan
    #[test]
    fn test_unknown_item_aborts_batch() {
        let items = vec![item("A", "A1", "10", "100", "5")];
        let requests = vec![sell_line("A", "10"), sell_line("X", "10")];
        let err = plan_bulk(&items, &requests, Direction::Sell).unwrap_err();

        assert_eq!(err, PlanError::ItemNotFound("X".to_string()));
    }

    /// Two lines against the same item see each other's effect
    #[test]
    fn test_repeated_item_consumes_working_stock() {
        let items = vec![item("A", "A1", "10", "100", "5")];

        // 60 + 30 fits in 100
        let ok = plan_bulk(
            &items,
            &[sell_line("A", "60"), sell_line("A", "30")],
            Direction::Sell,
        );
        assert!(ok.is_ok());

        // 60 + 60 does not; the second line must see only 40 left
        let err = plan_bulk(
            &items,
            &[sell_line("A", "60"), sell_line("A", "60")],
            Direction::Sell,
        )
        .unwrap_err();
        assert!(matches!(err, PlanError::InsufficientStock { .. }));
    }

    /// The aggregate row is never a valid sell target
    #[test]
    fn test_aggregate_row_not_resolvable() {
        let items = vec![item(AGGREGATE_PROFILE, "T", "1", "500", "5")];
        let err = plan_bulk(
            &items,
            &[sell_line(AGGREGATE_PROFILE, "10")],
            Direction::Sell,
        )
        .unwrap_err();

        assert_eq!(err, PlanError::ItemNotFound(AGGREGATE_PROFILE.to_string()));
    }

    /// A line with no positive unit is rejected
    #[test]
    fn test_missing_quantity() {
        let items = vec![item("A", "A1", "10", "100", "5")];
        let line = LineRequest {
            profile: Some("A".to_string()),
            code: None,
            packs: Some(Decimal::ZERO),
            lengths: None,
            qty: None,
        };
        let err = plan_bulk(&items, &[line], Direction::Sell).unwrap_err();

        assert_eq!(
            err,
            PlanError::MissingQuantity {
                item: "A".to_string()
            }
        );
    }

    #[test]
    fn test_empty_batch() {
        let items = vec![item("A", "A1", "10", "100", "5")];
        let err = plan_bulk(&items, &[], Direction::Sell).unwrap_err();
        assert_eq!(err, PlanError::EmptyBatch);
    }

    /// Lines match by code when the profile differs
    #[test]
    fn test_match_by_code() {
        let items = vec![item("A", "A1", "10", "100", "5")];
        let line = LineRequest {
            profile: None,
            code: Some("A1".to_string()),
            packs: None,
            lengths: None,
            qty: Some(dec("10")),
        };
        assert!(plan_bulk(&items, &[line], Direction::Sell).is_ok());
    }

    /// Snapshot description falls back to the profile when blank
    #[test]
    fn test_description_falls_back_to_profile() {
        let items = vec![item("Angle 25mm", "A1", "10", "100", "5")];
        let plan = plan_bulk(
            &items,
            &[sell_line("Angle 25mm", "10")],
            Direction::Sell,
        )
        .unwrap();

        assert_eq!(plan.lines[0].description.as_deref(), Some("Angle 25mm"));
    }

    /// Aggregate delta equals the sum of the line deltas
    #[test]
    fn test_aggregate_is_sum_of_deltas() {
        let items = vec![
            item("A", "A1", "10", "100", "5"),
            item("B", "B1", "5", "200", "2"),
        ];
        let plan = plan_bulk(
            &items,
            &[sell_line("A", "40"), sell_line("B", "50")],
            Direction::Sell,
        )
        .unwrap();

        let qty_sum: Decimal = plan.deltas.iter().map(|d| d.qty).sum();
        let packs_sum: Decimal = plan.deltas.iter().map(|d| d.packs).sum();
        let amount_sum: Decimal = plan.deltas.iter().map(|d| d.amount).sum();

        assert_eq!(plan.aggregate.qty, qty_sum);
        assert_eq!(plan.aggregate.packs, packs_sum);
        assert_eq!(plan.aggregate.amount, amount_sum);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for a batch of (stock, request) pairs. Stock is always at
    /// least the requested quantity so the sell plans cleanly.
    fn batch_strategy() -> impl Strategy<Value = Vec<(i64, i64)>> {
        prop::collection::vec((1i64..=1000, 1i64..=1000), 1..8).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(req, extra)| (req + extra, req))
                .collect()
        })
    }

    fn items_for(batch: &[(i64, i64)]) -> Vec<Item> {
        batch
            .iter()
            .enumerate()
            .map(|(i, (stock, _))| {
                item(&format!("P{i}"), &format!("C{i}"), "1", &stock.to_string(), "3")
            })
            .collect()
    }

    fn requests_for(batch: &[(i64, i64)]) -> Vec<LineRequest> {
        batch
            .iter()
            .enumerate()
            .map(|(i, (_, req))| sell_line(&format!("P{i}"), &req.to_string()))
            .collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The aggregate delta is always the component-wise sum of the
        /// line deltas, for both directions.
        #[test]
        fn prop_aggregate_mirrors_deltas(batch in batch_strategy()) {
            let items = items_for(&batch);
            let requests = requests_for(&batch);

            for direction in [Direction::Sell, Direction::Buy] {
                let plan = plan_bulk(&items, &requests, direction).unwrap();

                let qty: Decimal = plan.deltas.iter().map(|d| d.qty).sum();
                let lengths: Decimal = plan.deltas.iter().map(|d| d.lengths).sum();
                let packs: Decimal = plan.deltas.iter().map(|d| d.packs).sum();
                let amount: Decimal = plan.deltas.iter().map(|d| d.amount).sum();

                prop_assert_eq!(plan.aggregate.qty, qty);
                prop_assert_eq!(plan.aggregate.lengths, lengths);
                prop_assert_eq!(plan.aggregate.packs, packs);
                prop_assert_eq!(plan.aggregate.amount, amount);
            }
        }

        /// Sell deltas never take any unit of any item below zero
        #[test]
        fn prop_sell_never_overdraws(batch in batch_strategy()) {
            let items = items_for(&batch);
            let requests = requests_for(&batch);

            let plan = plan_bulk(&items, &requests, Direction::Sell).unwrap();

            for (item, delta) in items.iter().zip(&plan.deltas) {
                prop_assert!(item.qty + delta.qty >= Decimal::ZERO);
                prop_assert!(item.lengths + delta.lengths >= Decimal::ZERO);
                prop_assert!(item.packs + delta.packs >= Decimal::ZERO);
            }
        }

        /// Appending one unknown line fails the whole batch, no matter
        /// how many valid lines precede it.
        #[test]
        fn prop_one_bad_line_fails_all(batch in batch_strategy()) {
            let items = items_for(&batch);
            let mut requests = requests_for(&batch);
            requests.push(sell_line("no-such-item", "1"));

            let result = plan_bulk(&items, &requests, Direction::Sell);
            prop_assert_eq!(
                result.unwrap_err(),
                PlanError::ItemNotFound("no-such-item".to_string())
            );
        }

        /// Total amount equals the sum of positive line amounts
        #[test]
        fn prop_total_amount_is_line_sum(batch in batch_strategy()) {
            let items = items_for(&batch);
            let requests = requests_for(&batch);

            let plan = plan_bulk(&items, &requests, Direction::Sell).unwrap();
            let sum: Decimal = plan.lines.iter().map(|l| l.sold_amount).sum();

            prop_assert_eq!(plan.total_amount, sum);
            prop_assert!(plan.total_amount > Decimal::ZERO);
        }

        /// Buy then sell of the same batch cancels out
        #[test]
        fn prop_buy_sell_symmetry(batch in batch_strategy()) {
            let items = items_for(&batch);
            let requests = requests_for(&batch);

            let buy = plan_bulk(&items, &requests, Direction::Buy).unwrap();
            let sell = plan_bulk(&items, &requests, Direction::Sell).unwrap();

            prop_assert_eq!(buy.aggregate.qty, -sell.aggregate.qty);
            prop_assert_eq!(buy.aggregate.packs, -sell.aggregate.packs);
            prop_assert_eq!(buy.aggregate.amount, -sell.aggregate.amount);
        }
    }
}
