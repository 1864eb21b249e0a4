//! Invoice presentation models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-user invoice presentation settings: brand colors, visible table
/// columns and the seller's company block printed on every invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceSettings {
    #[serde(rename = "logoUrl")]
    pub logo_url: Option<String>,
    #[serde(rename = "colorPrimary")]
    pub color_primary: String,
    #[serde(rename = "colorSecondary")]
    pub color_secondary: String,
    /// Table column keys to show, e.g. ["qty", "packets", "rate", "CGST", "SGST", "total"]
    #[serde(rename = "visibleFields")]
    pub visible_fields: Vec<String>,
    /// Show the vehicle number field in the buyer block
    #[serde(rename = "vehicleField")]
    pub vehicle_field: bool,
    #[serde(rename = "companyName")]
    pub company_name: String,
    pub gstin: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        Self {
            logo_url: None,
            color_primary: "#007BFF".to_string(),
            color_secondary: "#E9F5FF".to_string(),
            visible_fields: ["qty", "packets", "rate", "CGST", "SGST", "total"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            vehicle_field: true,
            company_name: String::new(),
            gstin: String::new(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
        }
    }
}

/// One fully-computed invoice table line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub s_no: u32,
    pub description: String,
    pub hsn_code: String,
    pub qty: Decimal,
    pub packets: Decimal,
    pub lengths: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub total: Decimal,
}

/// Column sums for the grand-total row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub qty: Decimal,
    pub packets: Decimal,
    pub lengths: Decimal,
    pub subtotal: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub grand_total: Decimal,
}

/// Everything the PDF renderer needs to lay out one tax invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDocument {
    pub invoice_no: String,
    pub date: chrono::NaiveDate,
    pub seller: InvoiceSettings,
    pub buyer: crate::models::CounterpartyInfo,
    pub lines: Vec<InvoiceLine>,
    pub totals: InvoiceTotals,
    pub amount_in_words: String,
}
