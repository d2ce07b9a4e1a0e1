//! Route definitions for the gateway API.

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

use crate::{handlers, middleware, state::AppState};

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    let cors = middleware::cors_layer(&state.cors_allowed_origins);

    Router::new()
        .route("/chat", post(handlers::chat))
        .route("/test-provider", post(handlers::test_provider))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_id_middleware))
                .layer(axum::middleware::from_fn(middleware::logging_middleware))
                .layer(cors)
                .layer(CatchPanicLayer::custom(middleware::handle_panic)),
        )
        .with_state(state)
}
