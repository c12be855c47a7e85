//! HTTP handlers for tutoring endpoints.

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::tutor::{GenerateContentCommand, SendChatMessageCommand};
use crate::domain::tutoring::GenerationRequest;

use super::dto::{ChatRequest, ChatResponse, GenerateRequest, GenerateResponse};

/// POST /api/chat - Ask the AI tutor
pub async fn send_chat_message(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = SendChatMessageCommand {
        user,
        history: request.history,
        message: request.message,
        subject: request.subject,
        grade: request.grade,
    };

    let result = state.send_chat_message_handler().handle(cmd).await?;

    Ok(Json(ChatResponse::from(result)))
}

/// POST /api/teacher/generate - Generate an exercise set, lesson plan or test
pub async fn generate_content(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<GenerateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let generation = GenerationRequest::new(
        request.kind,
        request.subject,
        request.grade,
        request.topic,
        request.question_count,
        request.difficulty,
        request.duration_minutes,
    )?;

    let result = state
        .generate_content_handler()
        .handle(GenerateContentCommand {
            user,
            request: generation,
        })
        .await?;

    Ok(Json(GenerateResponse::from(result)))
}
