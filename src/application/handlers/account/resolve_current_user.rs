//! ResolveCurrentUserHandler - maps a verified token to the stored account.
//!
//! The role always comes from the users table. First-time callers are
//! provisioned as parents with the default parent quota.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{AuthError, DomainError, ErrorCode, ServiceCalendar};
use crate::domain::quota::QuotaPolicy;
use crate::domain::user::UserAccount;
use crate::ports::{QuotaRepository, UserRepository, VerifiedIdentity};

#[derive(Debug, Clone)]
pub struct ResolveCurrentUserCommand {
    pub identity: VerifiedIdentity,
}

#[derive(Debug, Clone)]
pub struct ResolveCurrentUserResult {
    pub account: UserAccount,
    /// True when this call created the account.
    pub provisioned: bool,
}

pub struct ResolveCurrentUserHandler {
    users: Arc<dyn UserRepository>,
    quotas: Arc<dyn QuotaRepository>,
    policy: QuotaPolicy,
    calendar: ServiceCalendar,
}

impl ResolveCurrentUserHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        quotas: Arc<dyn QuotaRepository>,
        policy: QuotaPolicy,
        calendar: ServiceCalendar,
    ) -> Self {
        Self {
            users,
            quotas,
            policy,
            calendar,
        }
    }

    pub async fn handle(
        &self,
        cmd: ResolveCurrentUserCommand,
    ) -> Result<ResolveCurrentUserResult, AuthError> {
        let identity = cmd.identity;

        let (account, provisioned) = match self
            .users
            .find_by_id(&identity.user_id)
            .await
            .map_err(unavailable)?
        {
            Some(account) => (account, false),
            None => self.provision(identity).await?,
        };

        if !account.is_active {
            warn!(user_id = %account.id, "Rejected request from disabled account");
            return Err(AuthError::AccountDisabled);
        }

        Ok(ResolveCurrentUserResult {
            account,
            provisioned,
        })
    }

    async fn provision(&self, identity: VerifiedIdentity) -> Result<(UserAccount, bool), AuthError> {
        let email = identity.email.ok_or(AuthError::InvalidToken)?;
        let account = UserAccount::register(identity.user_id, email, identity.full_name)
            .map_err(|_| AuthError::InvalidToken)?;

        match self.users.save(&account).await {
            Ok(()) => {}
            // A concurrent first request won the insert.
            Err(err) if err.code == ErrorCode::Conflict => {
                return match self.users.find_by_id(&account.id).await.map_err(unavailable)? {
                    Some(existing) => Ok((existing, false)),
                    None => Err(AuthError::service_unavailable(
                        "email is already registered to another account",
                    )),
                };
            }
            Err(err) => return Err(unavailable(err)),
        }

        let quota = self
            .policy
            .quota_for(account.id, account.role, self.calendar.today());
        self.quotas
            .insert_if_absent(&quota)
            .await
            .map_err(unavailable)?;

        info!(user_id = %account.id, role = %account.role, "Provisioned new account");
        Ok((account, true))
    }
}

fn unavailable(err: DomainError) -> AuthError {
    AuthError::service_unavailable(err.to_string())
}
