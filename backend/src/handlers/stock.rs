//! HTTP handlers for bulk buy/sell and transaction history

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::stock::{BulkOutcome, BulkRequest};
use crate::services::StockService;
use crate::AppState;
use shared::models::Transaction;
use shared::types::Direction;

/// Sell materials: subtracts stock and appends a Sold transaction
pub async fn sell_materials(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<BulkRequest>,
) -> AppResult<Json<BulkOutcome>> {
    let service = StockService::new(state.db);
    let outcome = service
        .execute_bulk(current_user.0.user_id, Direction::Sell, body)
        .await?;
    Ok(Json(outcome))
}

/// Buy materials: adds stock and appends a Bought transaction
pub async fn buy_materials(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<BulkRequest>,
) -> AppResult<Json<BulkOutcome>> {
    let service = StockService::new(state.db);
    let outcome = service
        .execute_bulk(current_user.0.user_id, Direction::Buy, body)
        .await?;
    Ok(Json(outcome))
}

/// List the caller's transactions, newest first
pub async fn list_transactions(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Transaction>>> {
    let service = StockService::new(state.db);
    let transactions = service.list_transactions(current_user.0.user_id).await?;
    Ok(Json(transactions))
}
