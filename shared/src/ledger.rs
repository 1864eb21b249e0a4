//! Bulk transaction planner
//!
//! The pure half of the transaction engine. Given a snapshot of a user's
//! items and an ordered list of line requests, it resolves each line,
//! derives quantities through the conversion engine, enforces the
//! available-stock invariant for sells, and produces the complete set of
//! signed stock deltas plus the immutable line-outcome snapshots. It
//! either succeeds for the whole batch or fails with no partial output;
//! applying the plan (and rolling it back on storage failure) is the
//! backend's job.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::convert::derive_quantities;
use crate::models::{Item, LineOutcome};
use crate::types::{Direction, StockInput, StockTriple};

/// One requested line of a bulk buy/sell
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineRequest {
    #[serde(rename = "PROFILE")]
    pub profile: Option<String>,
    #[serde(rename = "CODE")]
    pub code: Option<String>,
    #[serde(rename = "PACKS", default)]
    pub packs: Option<Decimal>,
    #[serde(rename = "LENGTHS", default)]
    pub lengths: Option<Decimal>,
    #[serde(rename = "QTY", default)]
    pub qty: Option<Decimal>,
}

impl LineRequest {
    /// Identifier used in error messages: code if present, else profile.
    pub fn identifier(&self) -> String {
        self.code
            .clone()
            .or_else(|| self.profile.clone())
            .unwrap_or_else(|| "?".to_string())
    }

    pub fn stock_input(&self) -> Option<StockInput> {
        StockInput::from_parts(self.packs, self.lengths, self.qty)
    }
}

/// Why a batch could not be planned. Any variant aborts the whole batch.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlanError {
    #[error("transaction batch is empty")]
    EmptyBatch,

    #[error("no quantity supplied for item {item}")]
    MissingQuantity { item: String },

    #[error("item {0} not found")]
    ItemNotFound(String),

    #[error("insufficient stock for {item}")]
    InsufficientStock {
        item: String,
        available: StockTriple,
        required: StockTriple,
    },
}

/// Signed stock delta for one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDelta {
    pub item_id: Uuid,
    pub packs: Decimal,
    pub lengths: Decimal,
    pub qty: Decimal,
    pub amount: Decimal,
}

/// Signed delta to apply to the user's aggregate ("TOTAL") row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateDelta {
    pub packs: Decimal,
    pub lengths: Decimal,
    pub qty: Decimal,
    pub amount: Decimal,
}

impl AggregateDelta {
    fn zero() -> Self {
        Self {
            packs: Decimal::ZERO,
            lengths: Decimal::ZERO,
            qty: Decimal::ZERO,
            amount: Decimal::ZERO,
        }
    }
}

/// The fully-validated outcome of planning one batch
#[derive(Debug, Clone)]
pub struct BulkPlan {
    /// Per-item signed deltas, one entry per line, in request order
    pub deltas: Vec<ItemDelta>,
    /// Sum of all line deltas, to be applied to the aggregate row
    pub aggregate: AggregateDelta,
    /// Immutable line snapshots for the transaction record
    pub lines: Vec<LineOutcome>,
    pub total_amount: Decimal,
}

/// Plan a bulk buy or sell against a snapshot of the user's items.
///
/// Lines are processed in order against a working copy of the stock, so
/// two lines hitting the same item see each other's effect. The
/// aggregate row itself never resolves as a line target.
pub fn plan_bulk(
    items: &[Item],
    requests: &[LineRequest],
    direction: Direction,
) -> Result<BulkPlan, PlanError> {
    if requests.is_empty() {
        return Err(PlanError::EmptyBatch);
    }

    let mut working: Vec<Item> = items.to_vec();
    let mut deltas = Vec::with_capacity(requests.len());
    let mut aggregate = AggregateDelta::zero();
    let mut lines = Vec::with_capacity(requests.len());
    let mut total_amount = Decimal::ZERO;
    let sign = direction.sign();

    for request in requests {
        let item = working
            .iter_mut()
            .find(|i| !i.is_aggregate() && matches_identity(i, request))
            .ok_or_else(|| PlanError::ItemNotFound(request.identifier()))?;

        let input = request.stock_input().ok_or_else(|| PlanError::MissingQuantity {
            item: request.identifier(),
        })?;

        let derived = derive_quantities(input, &item.factors(), item.rate);

        if direction == Direction::Sell
            && (item.qty < derived.qty
                || item.lengths < derived.lengths
                || item.packs < derived.packs)
        {
            return Err(PlanError::InsufficientStock {
                item: item
                    .profile
                    .clone()
                    .or_else(|| item.code.clone())
                    .unwrap_or_else(|| request.identifier()),
                available: StockTriple {
                    packs: item.packs,
                    lengths: item.lengths,
                    qty: item.qty,
                },
                required: StockTriple {
                    packs: derived.packs,
                    lengths: derived.lengths,
                    qty: derived.qty,
                },
            });
        }

        item.packs += sign * derived.packs;
        item.lengths += sign * derived.lengths;
        item.qty += sign * derived.qty;
        item.amount += sign * derived.amount;

        deltas.push(ItemDelta {
            item_id: item.id,
            packs: sign * derived.packs,
            lengths: sign * derived.lengths,
            qty: sign * derived.qty,
            amount: sign * derived.amount,
        });

        aggregate.packs += sign * derived.packs;
        aggregate.lengths += sign * derived.lengths;
        aggregate.qty += sign * derived.qty;
        aggregate.amount += sign * derived.amount;

        lines.push(LineOutcome {
            profile: item.profile.clone(),
            code: item.code.clone(),
            hsn_code: item.hsn_code.clone(),
            description: item.description.clone().or_else(|| item.profile.clone()),
            rate: item.rate,
            sold_qty: derived.qty,
            sold_lengths: derived.lengths,
            sold_packs: derived.packs,
            sold_amount: derived.amount,
        });

        total_amount += derived.amount;
    }

    Ok(BulkPlan {
        deltas,
        aggregate,
        lines,
        total_amount,
    })
}

/// A line matches an item when the requested code equals the item's code
/// or the requested profile equals the item's profile. A side missing on
/// either end never matches.
fn matches_identity(item: &Item, request: &LineRequest) -> bool {
    let code_match = match (&item.code, &request.code) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };
    let profile_match = match (&item.profile, &request.profile) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };
    code_match || profile_match
}
