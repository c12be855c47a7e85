//! In-memory repository adapters for tests and local development.

mod payment_repository;
mod quota_repository;
mod subscription_repository;
mod user_repository;

pub use payment_repository::InMemoryPaymentRepository;
pub use quota_repository::InMemoryQuotaRepository;
pub use subscription_repository::InMemorySubscriptionRepository;
pub use user_repository::InMemoryUserRepository;
