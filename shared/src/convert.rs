//! Unit conversion engine
//!
//! Stock for one item is tracked in three parallel units: packs, lengths
//! and quantity (kg). They are related through the item's physical
//! conversion factors: one pack contains `length_per_pack` lengths, one
//! length weighs `profile_length * weight_per_meter` kg. Given a value in
//! any single unit, the other two and the monetary amount are derived.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::types::StockInput;

/// Physical conversion factors for one item.
///
/// Uploaded stock sheets routinely leave these blank or zero; a missing
/// or zero factor behaves as 1 so derivation never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionFactors {
    pub profile_length: Decimal,
    pub length_per_pack: Decimal,
    pub weight_per_meter: Decimal,
}

impl ConversionFactors {
    pub fn new(
        profile_length: Decimal,
        length_per_pack: Decimal,
        weight_per_meter: Decimal,
    ) -> Self {
        Self {
            profile_length,
            length_per_pack,
            weight_per_meter,
        }
    }

    /// Factors with the zero-behaves-as-1 policy applied.
    fn effective(&self) -> (Decimal, Decimal, Decimal) {
        let or_one = |d: Decimal| if d.is_zero() { Decimal::ONE } else { d };
        (
            or_one(self.profile_length),
            or_one(self.length_per_pack),
            or_one(self.weight_per_meter),
        )
    }
}

impl Default for ConversionFactors {
    fn default() -> Self {
        Self {
            profile_length: Decimal::ONE,
            length_per_pack: Decimal::ONE,
            weight_per_meter: Decimal::ONE,
        }
    }
}

/// All three units plus the monetary amount derived from one input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedQuantities {
    pub qty: Decimal,
    pub lengths: Decimal,
    pub packs: Decimal,
    pub amount: Decimal,
}

/// Round a unit quantity for storage stability (4 decimal places).
pub fn round_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a monetary amount (2 decimal places).
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Derive the full set of quantities and the amount from a single input
/// unit, the item's conversion factors and its unit rate.
///
/// The supplied unit is the source of truth; the other two are computed
/// from it. Quantities are rounded to 4 decimal places, the amount to 2.
pub fn derive_quantities(
    input: StockInput,
    factors: &ConversionFactors,
    rate: Decimal,
) -> DerivedQuantities {
    let (profile_length, length_per_pack, weight_per_meter) = factors.effective();
    let kg_per_length = profile_length * weight_per_meter;

    let (packs, lengths, qty) = match input {
        StockInput::Packs(packs) => {
            let lengths = packs * length_per_pack;
            (packs, lengths, lengths * kg_per_length)
        }
        StockInput::Lengths(lengths) => {
            (lengths / length_per_pack, lengths, lengths * kg_per_length)
        }
        StockInput::Qty(qty) => {
            let lengths = qty / kg_per_length;
            (lengths / length_per_pack, lengths, qty)
        }
    };

    DerivedQuantities {
        qty: round_unit(qty),
        lengths: round_unit(lengths),
        packs: round_unit(packs),
        amount: round_money(qty * rate),
    }
}
