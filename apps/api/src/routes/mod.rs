pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::classifier::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Classification API
        .route("/classify", post(handlers::handle_classify))
        .route("/classify/batch", post(handlers::handle_classify_batch))
        // Rule catalogue
        .route("/rules", get(handlers::handle_get_rules))
        .route("/rules/reload", post(handlers::handle_reload_rules))
        .with_state(state)
}
