//! HTTP handlers for item management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::ItemService;
use crate::AppState;
use shared::models::{Item, NewItem};

/// List the caller's items
pub async fn list_items(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Item>>> {
    let service = ItemService::new(state.db);
    let items = service.list(current_user.0.user_id).await?;
    Ok(Json(items))
}

/// Create one item
pub async fn create_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<NewItem>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let service = ItemService::new(state.db);
    let item = service.create(current_user.0.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Delete one item by id
pub async fn delete_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(item_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    let service = ItemService::new(state.db);
    service.delete(current_user.0.user_id, item_id).await?;
    Ok(Json(MessageResponse {
        message: "Item deleted".to_string(),
    }))
}

/// Bulk-upload stock rows
pub async fn upload_items(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(items): Json<Vec<NewItem>>,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    let service = ItemService::new(state.db);
    let count = service.upload(current_user.0.user_id, items).await?;
    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "Data uploaded successfully".to_string(),
            count,
        }),
    ))
}

/// Delete all of the caller's items
pub async fn delete_all_items(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<MessageResponse>> {
    let service = ItemService::new(state.db);
    service.delete_all(current_user.0.user_id).await?;
    Ok(Json(MessageResponse {
        message: "Data deleted successfully".to_string(),
    }))
}

#[derive(Deserialize)]
pub struct UpdateRateRequest {
    #[serde(rename = "newRate")]
    pub new_rate: Decimal,
}

/// Reprice every item to a single new rate
pub async fn update_rates(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<UpdateRateRequest>,
) -> AppResult<Json<UpdateRateResponse>> {
    let service = ItemService::new(state.db);
    let total_amount = service
        .update_rates(current_user.0.user_id, body.new_rate)
        .await?;
    Ok(Json(UpdateRateResponse {
        message: "Rates and amounts updated successfully".to_string(),
        new_rate: body.new_rate,
        total_amount,
    }))
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub count: u64,
}

#[derive(Serialize)]
pub struct UpdateRateResponse {
    pub message: String,
    #[serde(rename = "newRate")]
    pub new_rate: Decimal,
    #[serde(rename = "totalAmount")]
    pub total_amount: Decimal,
}
