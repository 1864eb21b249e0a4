//! Common types used across the platform

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One user-supplied quantity for a transaction line, in exactly one unit.
///
/// The wire format carries three optional fields (`PACKS`, `LENGTHS`,
/// `QTY`); when more than one is non-zero the first in the fixed order
/// packs > lengths > qty wins. That precedence is a policy inherited from
/// the spreadsheet workflows this system replaces, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockInput {
    Packs(Decimal),
    Lengths(Decimal),
    Qty(Decimal),
}

impl StockInput {
    /// Build from the three optional wire fields, applying the
    /// packs > lengths > qty precedence. Returns `None` when no field
    /// carries a positive value; callers must reject such lines.
    pub fn from_parts(
        packs: Option<Decimal>,
        lengths: Option<Decimal>,
        qty: Option<Decimal>,
    ) -> Option<Self> {
        let positive = |v: Option<Decimal>| v.filter(|d| *d > Decimal::ZERO);
        if let Some(p) = positive(packs) {
            Some(StockInput::Packs(p))
        } else if let Some(l) = positive(lengths) {
            Some(StockInput::Lengths(l))
        } else {
            positive(qty).map(StockInput::Qty)
        }
    }
}

/// Direction of a bulk stock operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sell,
    Buy,
}

impl Direction {
    /// Signed multiplier applied to stock deltas: sells subtract, buys add.
    pub fn sign(&self) -> Decimal {
        match self {
            Direction::Sell => -Decimal::ONE,
            Direction::Buy => Decimal::ONE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Sell => "sell",
            Direction::Buy => "buy",
        }
    }
}

/// Stock expressed in all three parallel units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockTriple {
    pub packs: Decimal,
    pub lengths: Decimal,
    pub qty: Decimal,
}

impl StockTriple {
    pub const ZERO: StockTriple = StockTriple {
        packs: Decimal::ZERO,
        lengths: Decimal::ZERO,
        qty: Decimal::ZERO,
    };
}

/// Reserved profile name of the per-user aggregate stock row
pub const AGGREGATE_PROFILE: &str = "TOTAL";
