//! HTTP routes
//!
//! Thin handlers over the shared registry; every handler takes the lock,
//! calls one registry operation and wraps the result.

pub mod admin_routes;
pub mod auth_routes;
pub mod booking_routes;
pub mod driver_routes;

use axum::{routing::get, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Full application router with state, CORS and request tracing
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth_routes::create_auth_router())
        .nest("/api/admin", admin_routes::create_admin_router())
        .nest(
            "/api",
            booking_routes::create_booking_router().merge(driver_routes::create_driver_router()),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "drivesync",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
