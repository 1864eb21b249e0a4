//! Route definitions for the Vyapaar inventory and billing API

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Protected routes - item management
        .nest("/items", item_routes())
        // Protected routes - bulk stock movements
        .nest("/inventory", inventory_routes())
        // Protected routes - transaction history
        .nest("/transactions", transaction_routes())
        // Protected routes - invoice settings and documents
        .nest("/invoice-settings", invoice_settings_routes())
        .nest("/invoices", invoice_routes())
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
}

/// Item management routes (protected)
fn item_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_items)
                .post(handlers::create_item)
                .delete(handlers::delete_all_items),
        )
        .route("/upload", post(handlers::upload_items))
        .route("/update-rate", put(handlers::update_rates))
        .route("/:item_id", delete(handlers::delete_item))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Bulk stock movement routes (protected)
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/sell", post(handlers::sell_materials))
        .route("/buy", post(handlers::buy_materials))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Transaction history routes (protected)
fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_transactions))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Invoice settings routes (protected)
fn invoice_settings_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::get_invoice_settings).post(handlers::save_invoice_settings),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Invoice document routes (protected; token may arrive as a query
/// parameter when the document is opened in a new tab)
fn invoice_routes() -> Router<AppState> {
    Router::new()
        .route("/:transaction_id", get(handlers::get_invoice_document))
        .route_layer(middleware::from_fn(auth_middleware))
}
