//! Invoice service: per-user settings and invoice document assembly

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::InvoiceSettingsRow;
use crate::services::stock::StockService;
use shared::invoice::build_invoice;
use shared::models::{InvoiceDocument, InvoiceSettings, TransactionType};
use shared::validation::validate_hex_color;

/// Invoice service for settings and document building
#[derive(Clone)]
pub struct InvoiceService {
    db: PgPool,
}

const SETTINGS_COLUMNS: &str = "user_id, logo_url, color_primary, color_secondary, \
     visible_fields, vehicle_field, company_name, gstin, address, phone, email, \
     created_at, updated_at";

impl InvoiceService {
    /// Create a new InvoiceService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Fetch the caller's invoice settings, if configured
    pub async fn get_settings(&self, user_id: Uuid) -> AppResult<Option<InvoiceSettings>> {
        let row = sqlx::query_as::<_, InvoiceSettingsRow>(&format!(
            "SELECT {SETTINGS_COLUMNS} FROM invoice_settings WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(InvoiceSettings::from))
    }

    /// Insert or update the caller's invoice settings
    pub async fn save_settings(
        &self,
        user_id: Uuid,
        settings: InvoiceSettings,
    ) -> AppResult<InvoiceSettings> {
        for (field, color) in [
            ("colorPrimary", &settings.color_primary),
            ("colorSecondary", &settings.color_secondary),
        ] {
            if let Err(msg) = validate_hex_color(color) {
                return Err(AppError::Validation {
                    field: field.to_string(),
                    message: msg.to_string(),
                });
            }
        }

        let row = sqlx::query_as::<_, InvoiceSettingsRow>(&format!(
            r#"
            INSERT INTO invoice_settings (
                user_id, logo_url, color_primary, color_secondary, visible_fields,
                vehicle_field, company_name, gstin, address, phone, email
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (user_id) DO UPDATE SET
                logo_url = EXCLUDED.logo_url,
                color_primary = EXCLUDED.color_primary,
                color_secondary = EXCLUDED.color_secondary,
                visible_fields = EXCLUDED.visible_fields,
                vehicle_field = EXCLUDED.vehicle_field,
                company_name = EXCLUDED.company_name,
                gstin = EXCLUDED.gstin,
                address = EXCLUDED.address,
                phone = EXCLUDED.phone,
                email = EXCLUDED.email,
                updated_at = NOW()
            RETURNING {SETTINGS_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&settings.logo_url)
        .bind(&settings.color_primary)
        .bind(&settings.color_secondary)
        .bind(&settings.visible_fields)
        .bind(settings.vehicle_field)
        .bind(&settings.company_name)
        .bind(&settings.gstin)
        .bind(&settings.address)
        .bind(&settings.phone)
        .bind(&settings.email)
        .fetch_one(&self.db)
        .await?;

        Ok(InvoiceSettings::from(row))
    }

    /// Build the renderer payload for one of the caller's Sold
    /// transactions. Buys are never invoiced.
    pub async fn build_document(
        &self,
        user_id: Uuid,
        transaction_id: Uuid,
    ) -> AppResult<InvoiceDocument> {
        let transaction = StockService::new(self.db.clone())
            .get_transaction(user_id, transaction_id)
            .await?;

        if transaction.tx_type != TransactionType::Sold {
            return Err(AppError::NotFound("Sell transaction".to_string()));
        }

        let settings = self.get_settings(user_id).await?.ok_or_else(|| {
            AppError::InvalidRequest("Invoice settings not configured".to_string())
        })?;

        let now = Utc::now();
        let invoice_no = format!("INV-{}", now.timestamp_millis());

        Ok(build_invoice(
            invoice_no,
            now.date_naive(),
            settings,
            &transaction,
        ))
    }
}
