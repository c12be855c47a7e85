//! SendChatMessageHandler - one round trip with the AI tutor.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::TutorError;
use crate::application::handlers::QuotaMeter;
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::quota::QuotaSnapshot;
use crate::domain::tutoring::{tutor_system_prompt, ChatTranscript, ChatTurn, GradeLevel, Subject};
use crate::domain::user::{check_permission, Permission};
use crate::ports::{AIProvider, CompletionRequest, RequestMetadata, TokenUsage};

#[derive(Debug, Clone)]
pub struct SendChatMessageCommand {
    pub user: AuthenticatedUser,
    pub history: Vec<ChatTurn>,
    pub message: String,
    pub subject: Option<Subject>,
    pub grade: Option<GradeLevel>,
}

#[derive(Debug, Clone)]
pub struct SendChatMessageResult {
    pub reply: String,
    pub model: String,
    pub usage: TokenUsage,
    pub quota: QuotaSnapshot,
}

/// Forwards a chat transcript to the AI provider under the caller's quota.
///
/// Before the call the estimated prompt plus the completion budget is held
/// against the quota, so parallel chats from one account cannot all pass the
/// same check. The hold is replaced with the provider-reported total
/// afterwards and released when the call fails.
pub struct SendChatMessageHandler {
    ai: Arc<dyn AIProvider>,
    meter: QuotaMeter,
    max_tokens: u32,
}

impl SendChatMessageHandler {
    pub fn new(ai: Arc<dyn AIProvider>, meter: QuotaMeter, max_tokens: u32) -> Self {
        Self {
            ai,
            meter,
            max_tokens,
        }
    }

    pub async fn handle(
        &self,
        cmd: SendChatMessageCommand,
    ) -> Result<SendChatMessageResult, TutorError> {
        check_permission(&cmd.user, Permission::UseTutorChat)?;

        let transcript = ChatTranscript::new(cmd.history, cmd.message)?;
        let request = CompletionRequest::new(RequestMetadata::new(cmd.user.id, "tutor_chat"))
            .with_system_prompt(tutor_system_prompt(cmd.subject, cmd.grade))
            .with_turns(transcript.turns())
            .with_max_tokens(self.max_tokens);

        let estimated = self.ai.estimate_tokens(&request.prompt_text());
        let budget = estimated.saturating_add(self.max_tokens);
        let reservation = match self.meter.reserve(&cmd.user, estimated, budget).await {
            Ok(reservation) => reservation,
            Err(err) => {
                info!(user_id = %cmd.user.id, estimated, error = %err, "Chat rejected by quota");
                return Err(err.into());
            }
        };

        let trace_id = request.metadata.trace_id.clone();
        let response = match self.ai.complete(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(user_id = %cmd.user.id, %trace_id, error = %err, "Tutor completion failed");
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

        Ok(SendChatMessageResult {
            reply: response.content,
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
    use std::time::Duration;
    use crate::domain::quota::{QuotaPolicy, TokenQuota};
    use crate::ports::{AIError, MessageRole, QuotaRepository};

    struct Fixture {
        ai: Arc<MockAIProvider>,
        quotas: InMemoryQuotaRepository,
        handler: SendChatMessageHandler,
    }

    fn fixture(ai: MockAIProvider) -> Fixture {
        fixture_with_budget(ai, 1024)
    }

    fn fixture_with_budget(ai: MockAIProvider, max_tokens: u32) -> Fixture {
        let ai = Arc::new(ai);
        let quotas = InMemoryQuotaRepository::new();
        let meter = QuotaMeter::new(
            Arc::new(quotas.clone()),
            Arc::new(InMemorySubscriptionRepository::new()),
            QuotaPolicy::default(),
            ServiceCalendar::vietnam(),
        );
        let handler = SendChatMessageHandler::new(ai.clone(), meter, max_tokens);
        Fixture {
            ai,
            quotas,
            handler,
        }
    }

    fn command(user: AuthenticatedUser, message: &str) -> SendChatMessageCommand {
        SendChatMessageCommand {
            user,
            history: vec![
                ChatTurn::user("Phân số là gì?"),
                ChatTurn::assistant("Phân số biểu diễn một phần của tổng thể."),
            ],
            message: message.to_string(),
            subject: Some(Subject::Math),
            grade: GradeLevel::new(4).ok(),
        }
    }

    fn parent() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "ph@example.vn", Role::Parent, None)
    }

    #[tokio::test]
    async fn replies_and_charges_reported_usage() {
        let f = fixture(
            MockAIProvider::new().with_response_usage("1/2 + 1/4 = 3/4", TokenUsage::new(120, 80)),
        );
        let user = parent();

        let result = f
            .handler
            .handle(command(user.clone(), "1/2 + 1/4 bằng bao nhiêu?"))
            .await
            .unwrap();

        assert_eq!(result.reply, "1/2 + 1/4 = 3/4");
        assert_eq!(result.usage.total_tokens, 200);
        assert_eq!(result.quota.used_today, 200);
        assert_eq!(result.quota.remaining, Some(19_800));
        assert_eq!(f.quotas.find(&user.id).await.unwrap().unwrap().used_today, 200);
    }

    #[tokio::test]
    async fn sends_system_prompt_history_and_new_message() {
        let f = fixture(MockAIProvider::new());
        f.handler
            .handle(command(parent(), "Cho con ví dụ"))
            .await
            .unwrap();

        let calls = f.ai.get_calls();
        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert!(call.system_prompt.is_some());
        assert_eq!(call.max_tokens, Some(1024));
        assert_eq!(call.messages.len(), 3);
        let last = call.messages.last().unwrap();
        assert_eq!(last.role, MessageRole::User);
        assert_eq!(last.content, "Cho con ví dụ");
    }

    #[tokio::test]
    async fn exhausted_quota_blocks_the_call() {
        let f = fixture(MockAIProvider::new());
        let user = parent();
        let today = ServiceCalendar::vietnam().today();
        let mut quota = TokenQuota::new(user.id, Some(20_000), today);
        quota.charge(20_000, today);
        f.quotas.save(&quota).await.unwrap();

        let err = f.handler.handle(command(user, "Con chào cô")).await.unwrap_err();

        assert_eq!(err, TutorError::QuotaExceeded { used: 20_000, limit: 20_000 });
        assert_eq!(f.ai.call_count(), 0);
    }

    #[tokio::test]
    async fn failed_completion_is_not_charged() {
        let f = fixture(MockAIProvider::new().with_error(AIError::unavailable("down")));
        let user = parent();

        let err = f.handler.handle(command(user.clone(), "Xin chào")).await.unwrap_err();

        assert!(matches!(err, TutorError::Ai(AIError::Unavailable { .. })));
        assert_eq!(f.quotas.find(&user.id).await.unwrap().unwrap().used_today, 0);
    }

    #[tokio::test]
    async fn hold_is_visible_while_the_call_is_in_flight() {
        let f = fixture(
            MockAIProvider::new()
                .with_delay(Duration::from_millis(50))
                .with_response_usage("ok", TokenUsage::new(40, 60)),
        );
        let f = Arc::new(f);
        let user = parent();

        let call = {
            let f = f.clone();
            let user = user.clone();
            tokio::spawn(async move { f.handler.handle(command(user, "Xin chào")).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        let held = f.quotas.find(&user.id).await.unwrap().unwrap().used_today;
        assert!(held > 1024, "in-flight call should hold its budget, held {held}");

        call.await.unwrap().unwrap();
        assert_eq!(f.quotas.find(&user.id).await.unwrap().unwrap().used_today, 100);
    }

    #[tokio::test]
    async fn parallel_chats_cannot_overrun_the_limit() {
        let mut ai = MockAIProvider::new().with_delay(Duration::from_millis(50));
        for _ in 0..6 {
            ai = ai.with_response_usage("Trả lời dài", TokenUsage::new(100, 14_900));
        }
        let f = Arc::new(fixture_with_budget(ai, 15_000));
        let user = parent();

        let calls: Vec<_> = (0..6)
            .map(|_| {
                let f = f.clone();
                let user = user.clone();
                tokio::spawn(async move { f.handler.handle(command(user, "Giải giúp con")).await })
            })
            .collect();
        let mut admitted = 0;
        let mut rejected = 0;
        for call in calls {
            match call.await.unwrap() {
                Ok(_) => admitted += 1,
                Err(TutorError::QuotaExceeded { .. }) => rejected += 1,
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }

        assert_eq!(admitted, 2);
        assert_eq!(rejected, 4);
        assert_eq!(f.ai.call_count(), 2);
        let used = f.quotas.find(&user.id).await.unwrap().unwrap().used_today;
        assert!(used <= 20_000 + 15_000, "used {used}");
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let f = fixture(MockAIProvider::new());
        let err = f.handler.handle(command(parent(), "   ")).await.unwrap_err();
        assert!(matches!(err, TutorError::ValidationFailed { .. }));
        assert_eq!(f.ai.call_count(), 0);
    }

    #[tokio::test]
    async fn unlimited_admin_is_never_blocked() {
        let f = fixture(
            MockAIProvider::new().with_response_usage("ok", TokenUsage::new(1_000_000, 1)),
        );
        let admin = AuthenticatedUser::new(UserId::new(), "qt@example.vn", Role::Admin, None);

        let result = f.handler.handle(command(admin, "Kiểm tra")).await.unwrap();
        assert_eq!(result.quota.remaining, None);
    }
}
