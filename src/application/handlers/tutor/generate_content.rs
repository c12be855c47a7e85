//! GenerateContentHandler - exercises, lesson plans and tests for teachers.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::TutorError;
use crate::application::handlers::QuotaMeter;
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::quota::QuotaSnapshot;
use crate::domain::tutoring::{ContentKind, GenerationRequest};
use crate::domain::user::{check_permission, Permission};
use crate::ports::{AIProvider, CompletionRequest, MessageRole, RequestMetadata, TokenUsage};

#[derive(Debug, Clone)]
pub struct GenerateContentCommand {
    pub user: AuthenticatedUser,
    pub request: GenerationRequest,
}

#[derive(Debug, Clone)]
pub struct GenerateContentResult {
    pub kind: ContentKind,
    pub content: String,
    pub model: String,
    pub usage: TokenUsage,
    pub quota: QuotaSnapshot,
}

/// Same quota discipline as tutor chat: hold the prompt plus completion
/// budget, settle with the reported usage, release on failure.
pub struct GenerateContentHandler {
    ai: Arc<dyn AIProvider>,
    meter: QuotaMeter,
    max_tokens: u32,
}

impl GenerateContentHandler {
    pub fn new(ai: Arc<dyn AIProvider>, meter: QuotaMeter, max_tokens: u32) -> Self {
        Self {
            ai,
            meter,
            max_tokens,
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateContentCommand,
    ) -> Result<GenerateContentResult, TutorError> {
        check_permission(&cmd.user, Permission::GenerateContent)?;

        let kind = cmd.request.kind;
        let request = CompletionRequest::new(RequestMetadata::new(cmd.user.id, kind.as_str()))
            .with_system_prompt(cmd.request.system_prompt())
            .with_message(MessageRole::User, cmd.request.prompt())
            .with_max_tokens(self.max_tokens);

        let estimated = self.ai.estimate_tokens(&request.prompt_text());
        let budget = estimated.saturating_add(self.max_tokens);
        let reservation = match self.meter.reserve(&cmd.user, estimated, budget).await {
            Ok(reservation) => reservation,
            Err(err) => {
                info!(user_id = %cmd.user.id, kind = kind.as_str(), estimated, error = %err, "Generation rejected by quota");
                return Err(err.into());
            }
        };

        let trace_id = request.metadata.trace_id.clone();
        let response = match self.ai.complete(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(user_id = %cmd.user.id, kind = kind.as_str(), %trace_id, error = %err, "Content generation failed");
                if let Err(release) = self.meter.settle(&cmd.user, &reservation, 0).await {
                    error!(user_id = %cmd.user.id, error = %release, "Failed to release quota hold");
                }
                return Err(TutorError::Ai(err));
            }
        };

        let quota = self
            .meter
            .settle(&cmd.user, &reservation, response.usage.total_tokens)
            .await?;

        Ok(GenerateContentResult {
            kind,
            content: response.content,
            model: response.model,
            usage: response.usage,
            quota,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::memory::{InMemoryQuotaRepository, InMemorySubscriptionRepository};
    use crate::domain::foundation::{Role, ServiceCalendar, UserId};
    use crate::domain::quota::QuotaPolicy;
    use crate::domain::tutoring::{Difficulty, GradeLevel, Subject};

    fn handler(ai: Arc<MockAIProvider>) -> GenerateContentHandler {
        let meter = QuotaMeter::new(
            Arc::new(InMemoryQuotaRepository::new()),
            Arc::new(InMemorySubscriptionRepository::new()),
            QuotaPolicy::default(),
            ServiceCalendar::vietnam(),
        );
        GenerateContentHandler::new(ai, meter, 2048)
    }

    fn exercise() -> GenerationRequest {
        GenerationRequest::new(
            ContentKind::Exercise,
            Subject::Math,
            GradeLevel::new(6).unwrap(),
            "Phép chia hết",
            Some(5),
            Difficulty::Medium,
            None,
        )
        .unwrap()
    }

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "gv@example.vn", role, None)
    }

    #[tokio::test]
    async fn teacher_generates_exercise() {
        let ai = Arc::new(
            MockAIProvider::new().with_response_usage("Bài 1: ...", TokenUsage::new(300, 700)),
        );
        let result = handler(ai.clone())
            .handle(GenerateContentCommand {
                user: user(Role::Teacher),
                request: exercise(),
            })
            .await
            .unwrap();

        assert_eq!(result.kind, ContentKind::Exercise);
        assert_eq!(result.content, "Bài 1: ...");
        assert_eq!(result.quota.used_today, 1_000);
        assert_eq!(result.quota.remaining, Some(49_000));

        let call = &ai.get_calls()[0];
        assert_eq!(call.metadata.purpose, "exercise");
        assert!(call.messages[0].content.contains("Phép chia hết"));
    }

    #[tokio::test]
    async fn parent_cannot_generate() {
        let ai = Arc::new(MockAIProvider::new());
        let err = handler(ai.clone())
            .handle(GenerateContentCommand {
                user: user(Role::Parent),
                request: exercise(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, TutorError::Forbidden);
        assert_eq!(ai.call_count(), 0);
    }
}
