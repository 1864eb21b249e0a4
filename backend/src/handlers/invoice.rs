//! HTTP handlers for invoice settings and invoice documents

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::InvoiceService;
use crate::AppState;
use shared::models::{InvoiceDocument, InvoiceSettings};

/// Fetch the caller's invoice settings (null until configured)
pub async fn get_invoice_settings(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Option<InvoiceSettings>>> {
    let service = InvoiceService::new(state.db);
    let settings = service.get_settings(current_user.0.user_id).await?;
    Ok(Json(settings))
}

/// Save or update the caller's invoice settings
pub async fn save_invoice_settings(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(settings): Json<InvoiceSettings>,
) -> AppResult<Json<InvoiceSettings>> {
    let service = InvoiceService::new(state.db);
    let saved = service
        .save_settings(current_user.0.user_id, settings)
        .await?;
    Ok(Json(saved))
}

/// Build the invoice document for a Sold transaction. The response is
/// everything the PDF renderer needs to lay out the tax invoice.
pub async fn get_invoice_document(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(transaction_id): Path<Uuid>,
) -> AppResult<Json<InvoiceDocument>> {
    let service = InvoiceService::new(state.db);
    let document = service
        .build_document(current_user.0.user_id, transaction_id)
        .await?;
    Ok(Json(document))
}
