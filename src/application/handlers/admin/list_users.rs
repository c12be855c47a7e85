//! ListUsersHandler - paginated account listing, newest first.

use std::sync::Arc;

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::user::{check_permission, Permission, UserAccount, UserError};
use crate::ports::{UserFilter, UserRepository};

#[derive(Debug, Clone)]
pub struct ListUsersQuery {
    pub actor: AuthenticatedUser,
    pub filter: UserFilter,
}

pub struct ListUsersHandler {
    users: Arc<dyn UserRepository>,
}

impl ListUsersHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: ListUsersQuery) -> Result<Vec<UserAccount>, UserError> {
        check_permission(&query.actor, Permission::ManageUsers)?;
        Ok(self.users.list(query.filter).await?)
    }
}
