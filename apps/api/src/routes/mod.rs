pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::scoring::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/vectorize", post(handlers::handle_vectorize))
        .route("/api/v1/scores/uniqueness", post(handlers::handle_uniqueness))
        .route("/api/v1/scores/variety", post(handlers::handle_variety))
        .route(
            "/api/v1/scores/entrepreneurial",
            post(handlers::handle_entrepreneurial),
        )
        .with_state(state)
}
