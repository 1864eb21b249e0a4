//! Unit conversion engine tests
//!
//! Tests for deriving packs / lengths / qty / amount from a single input
//! unit, including the zero-factor policy, input precedence and rounding.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::convert::{derive_quantities, round_money, round_unit, ConversionFactors};
use shared::types::StockInput;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// One pack of 10 lengths, each length 1m at 1kg/m, rate 5/kg
    #[test]
    fn test_derive_from_qty() {
        let factors = ConversionFactors::new(dec("1"), dec("10"), dec("1"));
        let d = derive_quantities(StockInput::Qty(dec("40")), &factors, dec("5"));

        assert_eq!(d.qty, dec("40"));
        assert_eq!(d.lengths, dec("40"));
        assert_eq!(d.packs, dec("4"));
        assert_eq!(d.amount, dec("200"));
    }

    #[test]
    fn test_derive_from_packs() {
        // 2m lengths at 3kg/m, 5 lengths per pack
        let factors = ConversionFactors::new(dec("2"), dec("5"), dec("3"));
        let d = derive_quantities(StockInput::Packs(dec("4")), &factors, dec("10"));

        assert_eq!(d.lengths, dec("20"));
        assert_eq!(d.qty, dec("120"));
        assert_eq!(d.amount, dec("1200.00"));
    }

    #[test]
    fn test_derive_from_lengths() {
        let factors = ConversionFactors::new(dec("2"), dec("5"), dec("3"));
        let d = derive_quantities(StockInput::Lengths(dec("20")), &factors, dec("1"));

        assert_eq!(d.packs, dec("4"));
        assert_eq!(d.qty, dec("120"));
    }

    /// Sheets with blank factors must not divide by zero
    #[test]
    fn test_zero_factors_behave_as_one() {
        let factors = ConversionFactors::new(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        let d = derive_quantities(StockInput::Qty(dec("7")), &factors, dec("2"));

        assert_eq!(d.qty, dec("7"));
        assert_eq!(d.lengths, dec("7"));
        assert_eq!(d.packs, dec("7"));
        assert_eq!(d.amount, dec("14.00"));
    }

    /// Packs wins over lengths, lengths over qty
    #[test]
    fn test_input_precedence() {
        let input = StockInput::from_parts(Some(dec("2")), Some(dec("30")), Some(dec("400")));
        assert_eq!(input, Some(StockInput::Packs(dec("2"))));

        let input = StockInput::from_parts(None, Some(dec("30")), Some(dec("400")));
        assert_eq!(input, Some(StockInput::Lengths(dec("30"))));
    }

    /// Zero and missing fields are both "not supplied"
    #[test]
    fn test_no_usable_input() {
        assert_eq!(StockInput::from_parts(None, None, None), None);
        assert_eq!(
            StockInput::from_parts(Some(Decimal::ZERO), Some(Decimal::ZERO), None),
            None
        );
    }

    #[test]
    fn test_unit_rounding_is_four_places() {
        assert_eq!(round_unit(dec("33.33333")), dec("33.3333"));
        assert_eq!(round_unit(dec("0.00005")), dec("0.0001"));
    }

    #[test]
    fn test_money_rounding_is_two_places() {
        assert_eq!(round_money(dec("1.005")), dec("1.01"));
        assert_eq!(round_money(dec("199.994")), dec("199.99"));
    }

    #[test]
    fn test_non_integer_pack_count() {
        // 7 lengths per pack leaves fractional packs, stored at 4 dp
        let factors = ConversionFactors::new(dec("3"), dec("7"), dec("1"));
        let d = derive_quantities(StockInput::Qty(dec("100")), &factors, dec("1"));

        assert_eq!(d.lengths, dec("33.3333"));
        assert_eq!(d.packs, dec("4.7619"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for conversion factors (small positive integers)
    fn factor_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=12i64).prop_map(Decimal::from)
    }

    /// Strategy for unit rates
    fn rate_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=100000i64).prop_map(|n| Decimal::new(n, 2)) // 0.01 to 1000.00
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Deriving from qty and re-deriving from the resulting packs
        /// reproduces the original qty exactly when the qty is an exact
        /// multiple of the factors.
        #[test]
        fn prop_round_trip_through_packs(
            k in 1i64..=1000,
            pl in factor_strategy(),
            lpp in factor_strategy(),
            wm in factor_strategy(),
        ) {
            let factors = ConversionFactors::new(pl, lpp, wm);
            let qty = Decimal::from(k) * pl * lpp * wm;

            let from_qty = derive_quantities(StockInput::Qty(qty), &factors, Decimal::ONE);
            let from_packs =
                derive_quantities(StockInput::Packs(from_qty.packs), &factors, Decimal::ONE);

            prop_assert_eq!(from_qty.packs, Decimal::from(k));
            prop_assert_eq!(from_packs.qty, qty);
            prop_assert_eq!(from_packs.lengths, from_qty.lengths);
        }

        /// With all factors 1 the three units are the same number
        #[test]
        fn prop_default_factors_are_identity(n in 1i64..=100000) {
            let qty = Decimal::from(n);
            let d = derive_quantities(StockInput::Qty(qty), &ConversionFactors::default(), Decimal::ONE);

            prop_assert_eq!(d.qty, qty);
            prop_assert_eq!(d.lengths, qty);
            prop_assert_eq!(d.packs, qty);
        }

        /// Amount is always qty * rate rounded to 2 places
        #[test]
        fn prop_amount_is_qty_times_rate(
            qty in 1i64..=10000,
            rate in rate_strategy(),
        ) {
            let qty = Decimal::from(qty);
            let d = derive_quantities(StockInput::Qty(qty), &ConversionFactors::default(), rate);

            prop_assert_eq!(d.amount, round_money(qty * rate));
            prop_assert!(d.amount.scale() <= 2);
        }

        /// Positive input always derives positive quantities
        #[test]
        fn prop_derived_quantities_positive(
            n in 1i64..=10000,
            pl in factor_strategy(),
            lpp in factor_strategy(),
            wm in factor_strategy(),
        ) {
            let factors = ConversionFactors::new(pl, lpp, wm);
            let d = derive_quantities(StockInput::Packs(Decimal::from(n)), &factors, Decimal::ONE);

            prop_assert!(d.qty > Decimal::ZERO);
            prop_assert!(d.lengths > Decimal::ZERO);
            prop_assert!(d.packs > Decimal::ZERO);
        }

        /// Precedence always picks the first positive unit in
        /// packs > lengths > qty order
        #[test]
        fn prop_precedence_order(
            packs in prop::option::of(0i64..=100),
            lengths in prop::option::of(0i64..=100),
            qty in prop::option::of(0i64..=100),
        ) {
            let to_dec = |v: Option<i64>| v.map(Decimal::from);
            let input = StockInput::from_parts(to_dec(packs), to_dec(lengths), to_dec(qty));

            let expected = if packs.unwrap_or(0) > 0 {
                Some(StockInput::Packs(Decimal::from(packs.unwrap())))
            } else if lengths.unwrap_or(0) > 0 {
                Some(StockInput::Lengths(Decimal::from(lengths.unwrap())))
            } else if qty.unwrap_or(0) > 0 {
                Some(StockInput::Qty(Decimal::from(qty.unwrap())))
            } else {
                None
            };

            prop_assert_eq!(input, expected);
        }
    }
}
