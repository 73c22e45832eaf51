//! # Routes
//!
//! Axum router configuration for the payment API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /health - Health check
/// - POST /api/v1/payments - Create a payment record
/// - GET  /api/v1/payments/{id} - Fetch a payment record
/// - POST /api/v1/payments/{id}/checkout - Reserve a gateway order
/// - POST /api/v1/payments/{id}/callback - Verify the checkout callback
/// - POST /api/v1/payments/{id}/capture - Capture (trivial, auto-capture)
/// - POST /api/v1/payments/{id}/refund - Refund a captured payment
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - the checkout page may live on another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let payment_routes = Router::new()
        .route("/payments", post(handlers::create_payment))
        .route("/payments/{payment_id}", get(handlers::get_payment))
        .route(
            "/payments/{payment_id}/checkout",
            post(handlers::create_checkout),
        )
        .route(
            "/payments/{payment_id}/callback",
            post(handlers::confirm_checkout),
        )
        .route(
            "/payments/{payment_id}/capture",
            post(handlers::capture_payment),
        )
        .route(
            "/payments/{payment_id}/refund",
            post(handlers::refund_payment),
        );

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // API v1
        .nest("/api/v1", payment_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
