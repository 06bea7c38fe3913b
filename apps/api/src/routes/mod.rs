pub mod analyze;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Max accepted upload size. CVs are small; anything bigger is not a CV.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(analyze::root_handler))
        .route("/health", get(health::health_handler))
        .route("/companies", get(analyze::handle_companies))
        .route("/analyze", post(analyze::handle_analyze))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
