//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Bulk discounts
//! GET  /app/creatediscount     - Bulk discount form
//! POST /app/creatediscount     - Create a discount with generated codes (JSON)
//! ```

use axum::{Router, routing::get};

use crate::state::AppState;

pub mod discounts;

/// Discount routes, without state attached.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/app/creatediscount",
        get(discounts::new_bulk_discount).post(discounts::create_bulk_discount),
    )
}

/// The complete application router with state attached.
///
/// Tracing and Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check Shopify.
async fn health() -> &'static str {
    "ok"
}
