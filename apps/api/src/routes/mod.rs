pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::interview::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/interview", get(handlers::handle_get_interview))
        .route("/api/v1/interview/name", post(handlers::handle_submit_name))
        .route(
            "/api/v1/interview/answer",
            post(handlers::handle_submit_answer),
        )
        .route(
            "/api/v1/interview/continue",
            post(handlers::handle_continue),
        )
        .route("/api/v1/interview/reset", post(handlers::handle_reset))
        .fallback(not_found)
        .with_state(state)
}
