use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role prefix every stored role carries
pub const ROLE_PREFIX: &str = "ROLE_";
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
pub const ROLE_USER: &str = "ROLE_USER";

/// Account seeded at boot; the only one allowed to create admins
pub const SUPERADMIN_USERNAME: &str = "superadmin";
pub const SUPERADMIN_PASSWORD: &str = "superpass";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AppUser {
    pub id: i64,
    pub username: String,
    /// Stored and returned as plain text.
    pub password: String,
    pub role: String,
    pub is_immutable: bool,
}

/// True when the stored role is `ROLE_<role>`
pub fn role_grants(stored: &str, role: &str) -> bool {
    stored.strip_prefix(ROLE_PREFIX).map_or(false, |r| r == role)
}

/// A user that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppUser {
    pub username: String,
    pub password: String,
    pub role: String,
    pub is_immutable: bool,
}

impl NewAppUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role: role.into(),
            is_immutable: false,
        }
    }

    pub fn superadmin() -> Self {
        Self {
            is_immutable: true,
            ..Self::new(SUPERADMIN_USERNAME, SUPERADMIN_PASSWORD, ROLE_ADMIN)
        }
    }

    pub fn into_user(self, id: i64) -> AppUser {
        AppUser {
            id,
            username: self.username,
            password: self.password,
            role: self.role,
            is_immutable: self.is_immutable,
        }
    }
}

/// Prefixes `ROLE_` unless the role already carries it
pub fn normalize_role(role: &str) -> String {
    if role.starts_with(ROLE_PREFIX) {
        role.to_string()
    } else {
        format!("{}{}", ROLE_PREFIX, role)
    }
}
