//! Authentication handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::error::AppError;
use crate::services::auth::{AuthResponse, RegisterInput};
use crate::services::AuthService;
use crate::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register endpoint handler
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterInput>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let response = auth_service.register(body).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let response = auth_service.login(&body.email, &body.password).await?;

    Ok(Json(response))
}
