//! Axum routes for tutoring endpoints.

use axum::{routing::post, Router};

use super::handlers::{generate_content, send_chat_message};
use crate::adapters::http::state::AppState;

/// # Routes
/// - `POST /chat` - AI tutor chat (parents, teachers, admins)
/// - `POST /teacher/generate` - Content generation (teachers, admins)
pub fn tutor_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(send_chat_message))
        .route("/teacher/generate", post(generate_content))
}
