//! HTTP DTOs for tutoring endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::account::dto::QuotaResponse;
use crate::application::handlers::tutor::{GenerateContentResult, SendChatMessageResult};
use crate::domain::tutoring::{ChatTurn, ContentKind, Difficulty, GradeLevel, Subject};
use crate::ports::TokenUsage;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to send a chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Earlier turns kept by the client, oldest first.
    #[serde(default)]
    pub history: Vec<ChatTurn>,
    #[serde(default)]
    pub subject: Option<Subject>,
    #[serde(default)]
    pub grade: Option<GradeLevel>,
}

/// Request to generate teaching content.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub kind: ContentKind,
    pub subject: Subject,
    pub grade: GradeLevel,
    pub topic: String,
    #[serde(default)]
    pub question_count: Option<u32>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub model: String,
    pub usage: TokenUsage,
    pub quota: QuotaResponse,
}

impl From<SendChatMessageResult> for ChatResponse {
    fn from(result: SendChatMessageResult) -> Self {
        Self {
            reply: result.reply,
            model: result.model,
            usage: result.usage,
            quota: result.quota.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub kind: ContentKind,
    /// Generated Markdown.
    pub content: String,
    pub model: String,
    pub usage: TokenUsage,
    pub quota: QuotaResponse,
}

impl From<GenerateContentResult> for GenerateResponse {
    fn from(result: GenerateContentResult) -> Self {
        Self {
            kind: result.kind,
            content: result.content,
            model: result.model,
            usage: result.usage,
            quota: result.quota.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_defaults_history_and_context() {
        let req: ChatRequest = serde_json::from_str(r#"{"message":"2 + 2 bằng mấy?"}"#).unwrap();
        assert!(req.history.is_empty());
        assert_eq!(req.subject, None);
        assert_eq!(req.grade, None);
    }

    #[test]
    fn chat_request_parses_history_turns() {
        let req: ChatRequest = serde_json::from_str(
            r#"{
                "message": "Còn 3 + 5?",
                "history": [
                    {"role": "user", "content": "2 + 2 bằng mấy?"},
                    {"role": "assistant", "content": "Bằng 4."}
                ],
                "subject": "math",
                "grade": 2
            }"#,
        )
        .unwrap();
        assert_eq!(req.history.len(), 2);
        assert_eq!(req.subject, Some(Subject::Math));
        assert_eq!(req.grade.map(|g| g.value()), Some(2));
    }

    #[test]
    fn chat_request_rejects_out_of_range_grade() {
        let result: Result<ChatRequest, _> =
            serde_json::from_str(r#"{"message":"hi","grade":13}"#);
        assert!(result.is_err());
    }

    #[test]
    fn generate_request_defaults_difficulty() {
        let req: GenerateRequest = serde_json::from_str(
            r#"{"kind":"lesson_plan","subject":"physics","grade":10,"topic":"Chuyển động thẳng đều"}"#,
        )
        .unwrap();
        assert_eq!(req.kind, ContentKind::LessonPlan);
        assert_eq!(req.difficulty, Difficulty::Medium);
        assert_eq!(req.question_count, None);
    }
}
