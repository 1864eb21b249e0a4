//! Error handling for the Vyapaar backend
//!
//! Every failure surfaces as a structured `{error: {code, message, ...}}`
//! response; stock failures additionally carry the available vs required
//! quantities for diagnostics.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::ledger::PlanError;
use shared::types::{Direction, StockTriple};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    // Validation errors
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Conflict: {message}")]
    Conflict { resource: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Business logic errors
    #[error("Insufficient stock for {item}")]
    InsufficientStock {
        item: String,
        available: StockTriple,
        required: StockTriple,
    },

    /// A batch failed while committing; the whole batch was rolled back.
    #[error("{direction:?} operation failed")]
    OperationFailed {
        direction: Direction,
        #[source]
        source: sqlx::Error,
    },

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl From<PlanError> for AppError {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::EmptyBatch => {
                AppError::InvalidRequest("Expected a non-empty { items: [...] } batch".to_string())
            }
            PlanError::MissingQuantity { item } => AppError::Validation {
                field: "items".to_string(),
                message: format!("No quantity supplied for item {}", item),
            },
            PlanError::ItemNotFound(id) => AppError::NotFound(format!("Item {}", id)),
            PlanError::InsufficientStock {
                item,
                available,
                required,
            } => AppError::InsufficientStock {
                item,
                available,
                required,
            },
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorDetail {
    fn new(code: &str, message: String) -> Self {
        Self {
            code: code.to_string(),
            message,
            field: None,
            details: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail::new("INVALID_CREDENTIALS", "Invalid email or password".to_string()),
            ),
            AppError::InvalidRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::new("INVALID_REQUEST", message.clone()),
            ),
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    field: Some(field.clone()),
                    ..ErrorDetail::new("VALIDATION_ERROR", message.clone())
                },
            ),
            AppError::Conflict { resource, message } => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    field: Some(resource.clone()),
                    ..ErrorDetail::new("CONFLICT", message.clone())
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail::new("NOT_FOUND", format!("{} not found", resource)),
            ),
            AppError::InsufficientStock {
                item,
                available,
                required,
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    details: Some(serde_json::json!({
                        "available": available,
                        "required": required,
                    })),
                    ..ErrorDetail::new(
                        "INSUFFICIENT_STOCK",
                        format!("Insufficient stock for {}", item),
                    )
                },
            ),
            AppError::OperationFailed { direction, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new(
                    "OPERATION_FAILED",
                    format!("{} operation failed", capitalize(direction.as_str())),
                ),
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("DATABASE_ERROR", "A database error occurred".to_string()),
            ),
            AppError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new("INTERNAL_ERROR", message.clone()),
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail::new(
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                ),
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
