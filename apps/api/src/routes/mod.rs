pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Scoring API
        .route("/api/v1/score", post(handlers::handle_score))
        .route("/api/v1/score/bulk", post(handlers::handle_score_bulk))
        .with_state(state)
}
