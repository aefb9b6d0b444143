use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/", get(handlers::index))
        .route("/upload", post(handlers::upload_form))
        .route("/dashboard", get(handlers::dashboard))
        .route("/api/upload", post(handlers::upload_api))
        .route("/api/results", get(handlers::get_results))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
