//! Stock item models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::convert::ConversionFactors;
use crate::types::AGGREGATE_PROFILE;

/// One stock-keeping unit owned by a user.
///
/// Field names on the wire keep the uppercase headers of the stock
/// sheets users upload (`PROFILE`, `HSN_CODE`, ...), so existing client
/// spreadsheets round-trip unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    #[serde(rename = "PROFILE")]
    pub profile: Option<String>,
    #[serde(rename = "S_NO")]
    pub s_no: Option<i32>,
    #[serde(rename = "HSN_CODE")]
    pub hsn_code: Option<String>,
    #[serde(rename = "CODE")]
    pub code: Option<String>,
    #[serde(rename = "DESCRIPTION")]
    pub description: Option<String>,
    #[serde(rename = "WEIGHT_KG_M")]
    pub weight_per_meter: Decimal,
    #[serde(rename = "PROFILE_LEGT")]
    pub profile_length: Decimal,
    #[serde(rename = "LENGT_PACKT")]
    pub length_per_pack: Decimal,
    #[serde(rename = "PACKS")]
    pub packs: Decimal,
    #[serde(rename = "LENGTHS")]
    pub lengths: Decimal,
    #[serde(rename = "QTY")]
    pub qty: Decimal,
    #[serde(rename = "RATE")]
    pub rate: Decimal,
    #[serde(rename = "AMOUNT")]
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Whether this row is the synthetic per-user aggregate ("TOTAL") row.
    pub fn is_aggregate(&self) -> bool {
        self.profile.as_deref() == Some(AGGREGATE_PROFILE)
    }

    pub fn factors(&self) -> ConversionFactors {
        ConversionFactors::new(
            self.profile_length,
            self.length_per_pack,
            self.weight_per_meter,
        )
    }
}

/// Input for creating or uploading an item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    #[serde(rename = "PROFILE")]
    pub profile: Option<String>,
    #[serde(rename = "S_NO")]
    pub s_no: Option<i32>,
    #[serde(rename = "HSN_CODE")]
    pub hsn_code: Option<String>,
    #[serde(rename = "CODE")]
    pub code: Option<String>,
    #[serde(rename = "DESCRIPTION")]
    pub description: Option<String>,
    #[serde(rename = "WEIGHT_KG_M", default)]
    pub weight_per_meter: Option<Decimal>,
    #[serde(rename = "PROFILE_LEGT", default)]
    pub profile_length: Option<Decimal>,
    #[serde(rename = "LENGT_PACKT", default)]
    pub length_per_pack: Option<Decimal>,
    #[serde(rename = "PACKS", default)]
    pub packs: Option<Decimal>,
    #[serde(rename = "LENGTHS", default)]
    pub lengths: Option<Decimal>,
    #[serde(rename = "QTY", default)]
    pub qty: Option<Decimal>,
    #[serde(rename = "RATE", default)]
    pub rate: Option<Decimal>,
    #[serde(rename = "AMOUNT", default)]
    pub amount: Option<Decimal>,
}
