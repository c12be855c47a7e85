//! UserAccount aggregate.

use serde::Serialize;

use super::UserError;
use crate::domain::foundation::{AuthenticatedUser, Role, Timestamp, UserId, ValidationError};

const MAX_FULL_NAME_LEN: usize = 120;

/// Application-side profile of an identity provider user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAccount {
    pub id: UserId,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserAccount {
    /// Provisions a new account on first login. New accounts are parents.
    pub fn register(
        id: UserId,
        email: impl Into<String>,
        full_name: Option<String>,
    ) -> Result<Self, ValidationError> {
        let email = normalize_email(email.into())?;
        let full_name = normalize_full_name(full_name)?;
        let now = Timestamp::now();

        Ok(Self {
            id,
            email,
            full_name,
            role: Role::Parent,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Changes the role. Returns `false` if the role was already set.
    pub fn change_role(&mut self, new_role: Role, actor: &UserId) -> Result<bool, UserError> {
        if self.role == new_role {
            return Ok(false);
        }
        if self.id == *actor && self.role == Role::Admin {
            return Err(UserError::cannot_modify_self("demote"));
        }
        self.role = new_role;
        self.touch();
        Ok(true)
    }

    /// Blocks the account from signing in.
    pub fn deactivate(&mut self, actor: &UserId) -> Result<(), UserError> {
        if self.id == *actor {
            return Err(UserError::cannot_modify_self("deactivate"));
        }
        if self.is_active {
            self.is_active = false;
            self.touch();
        }
        Ok(())
    }

    pub fn activate(&mut self) {
        if !self.is_active {
            self.is_active = true;
            self.touch();
        }
    }

    /// Builds the request principal for this account.
    pub fn to_authenticated(&self) -> AuthenticatedUser {
        AuthenticatedUser::new(self.id, self.email.clone(), self.role, self.full_name.clone())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

fn normalize_email(email: String) -> Result<String, ValidationError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(ValidationError::invalid_format("email", "expected name@domain")),
    }
}

fn normalize_full_name(name: Option<String>) -> Result<Option<String>, ValidationError> {
    let Some(name) = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    let len = name.chars().count();
    if len > MAX_FULL_NAME_LEN {
        return Err(ValidationError::out_of_range(
            "full_name",
            1,
            MAX_FULL_NAME_LEN as i64,
            len as i64,
        ));
    }
    Ok(Some(name))
}
