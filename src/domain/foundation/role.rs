//! Account role.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Role stored on the user row. The only source of truth for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Parent,
}

impl Role {
    /// All roles, most privileged first.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Teacher, Role::Parent];

    /// Storage / wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Parent => "parent",
        }
    }

    /// Label shown to users.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Quản trị viên",
            Role::Teacher => "Giáo viên",
            Role::Parent => "Phụ huynh",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Parent
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "parent" => Ok(Role::Parent),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_roles_case_insensitively() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" teacher ".parse::<Role>().unwrap(), Role::Teacher);
        assert_eq!("parent".parse::<Role>().unwrap(), Role::Parent);
    }

    #[test]
    fn rejects_unknown_role() {
        assert!("student".parse::<Role>().is_err());
    }

    #[test]
    fn round_trips_through_as_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), "\"teacher\"");
    }

    #[test]
    fn default_role_is_parent() {
        assert_eq!(Role::default(), Role::Parent);
    }

    #[test]
    fn display_names_are_vietnamese() {
        assert_eq!(Role::Parent.display_name(), "Phụ huynh");
        assert_eq!(Role::Teacher.display_name(), "Giáo viên");
    }
}
