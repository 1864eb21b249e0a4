//! Database row models for the Vyapaar backend
//!
//! Row structs mirror the Postgres schema and convert into the wire
//! models from the shared crate.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use shared::models::{CounterpartyInfo, InvoiceSettings, Item, LineOutcome, Transaction, TransactionType};

/// One row of the items table
#[derive(Debug, Clone, FromRow)]
pub struct ItemRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub profile: Option<String>,
    pub s_no: Option<i32>,
    pub hsn_code: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub weight_per_meter: Decimal,
    pub profile_length: Decimal,
    pub length_per_pack: Decimal,
    pub packs: Decimal,
    pub lengths: Decimal,
    pub qty: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            profile: row.profile,
            s_no: row.s_no,
            hsn_code: row.hsn_code,
            code: row.code,
            description: row.description,
            weight_per_meter: row.weight_per_meter,
            profile_length: row.profile_length,
            length_per_pack: row.length_per_pack,
            packs: row.packs,
            lengths: row.lengths,
            qty: row.qty,
            rate: row.rate,
            amount: row.amount,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// One row of the transactions table, with the line snapshots and
/// counterparty block stored as JSONB
#[derive(Debug, Clone, FromRow)]
pub struct TransactionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tx_type: String,
    pub items: Json<Vec<LineOutcome>>,
    pub total_amount: Decimal,
    pub counterparty: Json<CounterpartyInfo>,
    pub created_at: DateTime<Utc>,
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        let tx_type = match row.tx_type.as_str() {
            "Sold" => TransactionType::Sold,
            _ => TransactionType::Bought,
        };
        Transaction {
            id: row.id,
            tx_type,
            items: row.items.0,
            total_amount: row.total_amount,
            counterparty: row.counterparty.0,
            created_at: row.created_at,
        }
    }
}

/// One row of the invoice_settings table
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceSettingsRow {
    pub user_id: Uuid,
    pub logo_url: Option<String>,
    pub color_primary: String,
    pub color_secondary: String,
    pub visible_fields: Vec<String>,
    pub vehicle_field: bool,
    pub company_name: String,
    pub gstin: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<InvoiceSettingsRow> for InvoiceSettings {
    fn from(row: InvoiceSettingsRow) -> Self {
        InvoiceSettings {
            logo_url: row.logo_url,
            color_primary: row.color_primary,
            color_secondary: row.color_secondary,
            visible_fields: row.visible_fields,
            vehicle_field: row.vehicle_field,
            company_name: row.company_name,
            gstin: row.gstin,
            address: row.address,
            phone: row.phone,
            email: row.email,
        }
    }
}
