//! Transaction ledger models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type of a committed bulk operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    Bought,
    Sold,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Bought => "Bought",
            TransactionType::Sold => "Sold",
        }
    }
}

/// Point-in-time snapshot of one resolved, computed transaction line.
///
/// Written once when the batch commits and never updated, so later rate
/// or stock edits cannot change what an invoice shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineOutcome {
    #[serde(rename = "PROFILE")]
    pub profile: Option<String>,
    #[serde(rename = "CODE")]
    pub code: Option<String>,
    #[serde(rename = "HSN_CODE")]
    pub hsn_code: Option<String>,
    #[serde(rename = "DESCRIPTION")]
    pub description: Option<String>,
    #[serde(rename = "RATE")]
    pub rate: Decimal,
    #[serde(rename = "soldQty")]
    pub sold_qty: Decimal,
    #[serde(rename = "soldLengths")]
    pub sold_lengths: Decimal,
    #[serde(rename = "soldPacks")]
    pub sold_packs: Decimal,
    #[serde(rename = "soldAmount")]
    pub sold_amount: Decimal,
}

/// Free-form buyer/seller contact block attached to a transaction.
/// Descriptive only; nothing here is validated against an invariant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CounterpartyInfo {
    #[serde(rename = "companyName")]
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub gstin: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "vehicleNumber")]
    pub vehicle_number: Option<String>,
}

/// An immutable record of one committed buy or sell batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub items: Vec<LineOutcome>,
    #[serde(rename = "totalAmount")]
    pub total_amount: Decimal,
    #[serde(rename = "buyerInfo")]
    pub counterparty: CounterpartyInfo,
    pub created_at: DateTime<Utc>,
}
