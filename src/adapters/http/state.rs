//! Shared application state for the HTTP layer.

use std::sync::Arc;

use crate::application::handlers::account::{
    GetMyQuotaHandler, GetProfileHandler, ResolveCurrentUserHandler,
};
use crate::application::handlers::admin::{
    ChangeUserRoleHandler, GetAdminStatsHandler, ListUsersHandler, ResetQuotaHandler,
    SetQuotaLimitHandler, SetUserActiveHandler,
};
use crate::application::handlers::payment::{
    ApprovePaymentRequestHandler, GetPaymentInstructionsHandler, ListMyPaymentsHandler,
    ListPaymentRequestsHandler, RejectPaymentRequestHandler, SubmitPaymentRequestHandler,
};
use crate::application::handlers::tutor::{GenerateContentHandler, SendChatMessageHandler};
use crate::application::QuotaMeter;
use crate::domain::foundation::ServiceCalendar;
use crate::domain::payment::BankAccount;
use crate::domain::quota::QuotaPolicy;
use crate::ports::{
    AIProvider, PaymentRepository, QuotaRepository, SessionValidator, SubscriptionRepository,
    UserRepository,
};

/// Shared application state containing all dependencies.
///
/// Cloned for each request; ports are Arc-wrapped and the handlers are
/// built on demand from them.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub quotas: Arc<dyn QuotaRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub ai: Arc<dyn AIProvider>,
    pub sessions: Arc<dyn SessionValidator>,
    pub policy: QuotaPolicy,
    pub calendar: ServiceCalendar,
    pub bank: BankAccount,
    /// Completion budget per AI call.
    pub ai_max_tokens: u32,
}

impl AppState {
    pub fn meter(&self) -> QuotaMeter {
        QuotaMeter::new(
            self.quotas.clone(),
            self.subscriptions.clone(),
            self.policy,
            self.calendar,
        )
    }

    // Account

    pub fn resolve_current_user_handler(&self) -> ResolveCurrentUserHandler {
        ResolveCurrentUserHandler::new(
            self.users.clone(),
            self.quotas.clone(),
            self.policy,
            self.calendar,
        )
    }

    pub fn get_profile_handler(&self) -> GetProfileHandler {
        GetProfileHandler::new(self.users.clone(), self.subscriptions.clone())
    }

    pub fn get_my_quota_handler(&self) -> GetMyQuotaHandler {
        GetMyQuotaHandler::new(self.meter())
    }

    // Tutoring

    pub fn send_chat_message_handler(&self) -> SendChatMessageHandler {
        SendChatMessageHandler::new(self.ai.clone(), self.meter(), self.ai_max_tokens)
    }

    pub fn generate_content_handler(&self) -> GenerateContentHandler {
        GenerateContentHandler::new(self.ai.clone(), self.meter(), self.ai_max_tokens)
    }

    // Payments

    pub fn submit_payment_handler(&self) -> SubmitPaymentRequestHandler {
        SubmitPaymentRequestHandler::new(self.payments.clone(), self.bank.clone())
    }

    pub fn list_my_payments_handler(&self) -> ListMyPaymentsHandler {
        ListMyPaymentsHandler::new(self.payments.clone())
    }

    pub fn payment_instructions_handler(&self) -> GetPaymentInstructionsHandler {
        GetPaymentInstructionsHandler::new(self.payments.clone(), self.bank.clone())
    }

    pub fn list_payment_requests_handler(&self) -> ListPaymentRequestsHandler {
        ListPaymentRequestsHandler::new(self.payments.clone())
    }

    pub fn approve_payment_handler(&self) -> ApprovePaymentRequestHandler {
        ApprovePaymentRequestHandler::new(
            self.payments.clone(),
            self.subscriptions.clone(),
            self.quotas.clone(),
            self.calendar,
        )
    }

    pub fn reject_payment_handler(&self) -> RejectPaymentRequestHandler {
        RejectPaymentRequestHandler::new(self.payments.clone())
    }

    // Admin

    pub fn list_users_handler(&self) -> ListUsersHandler {
        ListUsersHandler::new(self.users.clone())
    }

    pub fn change_user_role_handler(&self) -> ChangeUserRoleHandler {
        ChangeUserRoleHandler::new(
            self.users.clone(),
            self.quotas.clone(),
            self.subscriptions.clone(),
            self.policy,
            self.calendar,
        )
    }

    pub fn set_user_active_handler(&self) -> SetUserActiveHandler {
        SetUserActiveHandler::new(self.users.clone())
    }

    pub fn set_quota_limit_handler(&self) -> SetQuotaLimitHandler {
        SetQuotaLimitHandler::new(self.users.clone(), self.quotas.clone(), self.calendar)
    }

    pub fn reset_quota_handler(&self) -> ResetQuotaHandler {
        ResetQuotaHandler::new(self.quotas.clone(), self.calendar)
    }

    pub fn admin_stats_handler(&self) -> GetAdminStatsHandler {
        GetAdminStatsHandler::new(self.users.clone(), self.payments.clone())
    }
}
