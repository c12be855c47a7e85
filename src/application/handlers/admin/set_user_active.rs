//! SetUserActiveHandler - enables or disables an account.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{AuthenticatedUser, UserId};
use crate::domain::user::{check_permission, Permission, UserAccount, UserError};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct SetUserActiveCommand {
    pub actor: AuthenticatedUser,
    pub user_id: UserId,
    pub active: bool,
}

pub struct SetUserActiveHandler {
    users: Arc<dyn UserRepository>,
}

impl SetUserActiveHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: SetUserActiveCommand) -> Result<UserAccount, UserError> {
        check_permission(&cmd.actor, Permission::ManageUsers)?;

        let mut account = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or(UserError::not_found(cmd.user_id))?;

        if account.is_active == cmd.active {
            return Ok(account);
        }
        if cmd.active {
            account.activate();
        } else {
            account.deactivate(&cmd.actor.id)?;
        }
        self.users.update(&account).await?;

        info!(
            user_id = %account.id,
            admin_id = %cmd.actor.id,
            active = account.is_active,
            "User active flag changed"
        );
        Ok(account)
    }
}
