//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod routes;

use axum::Router;
use sqlx::PgPool;

pub use routes::create_router;

/// Path prefix for every API route
pub const API_PREFIX: &str = "/api/v1";

/// Full application: `/health` plus the API routes under `/api/v1`
pub fn create_app(pool: PgPool) -> Router {
    // Layers run outermost-last-added: context first, so the logger sees the
    // correlation id.
    let api_routes = create_router()
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(axum::middleware::from_fn(middleware::context_middleware));

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .nest(API_PREFIX, api_routes)
        .with_state(pool)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
