//! Ports - trait seams between the application core and infrastructure.

mod ai_provider;
mod payment_repository;
mod quota_repository;
mod session_validator;
mod subscription_repository;
mod user_repository;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use payment_repository::{PaymentFilter, PaymentRepository, PaymentStats};
pub use quota_repository::QuotaRepository;
pub use session_validator::{SessionValidator, VerifiedIdentity};
pub use subscription_repository::SubscriptionRepository;
pub use user_repository::{RoleCounts, UserFilter, UserRepository};
