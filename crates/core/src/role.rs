//! User role vocabulary.
//!
//! Stored as lowercase TEXT in the `users` table and carried in access-token
//! claims; `TryFrom<String>` exists so sqlx row decoding can use
//! `#[sqlx(try_from = "String")]` without this crate depending on sqlx.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// What a signed-in user is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Runs the shop: creates projects, assigns work, manages the roster.
    Manager,
    /// Works the floor: views the dashboard and logs hours on assigned jobs.
    Fabricator,
}

impl Role {
    /// The storage/wire string for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Fabricator => "fabricator",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "manager" => Ok(Self::Manager),
            "fabricator" => Ok(Self::Fabricator),
            other => Err(CoreError::Validation(format!("Unknown role: {other}"))),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_storage_string() {
        for role in [Role::Manager, Role::Fabricator] {
            assert_eq!(Role::try_from(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_validation_error() {
        let err = Role::try_from("foreman").unwrap_err();
        assert!(err.to_string().contains("foreman"));
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Manager).unwrap();
        assert_eq!(json, "\"manager\"");
    }
}
