use uuid::Uuid;

use crate::database::models::{role_grants, AppUser};

/// Caller resolved from Basic credentials
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub role: String,
}

impl AuthUser {
    /// `role` is given without the `ROLE_` prefix
    pub fn has_role(&self, role: &str) -> bool {
        role_grants(&self.role, role)
    }
}

impl From<&AppUser> for AuthUser {
    fn from(user: &AppUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role.clone(),
        }
    }
}

/// Per-request diagnostic context.
///
/// Inserted into the request extensions by the auth middleware and passed
/// explicitly to services; it lives exactly as long as the request.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub request_id: Uuid,
    pub user: Option<AuthUser>,
}

impl RequestContext {
    pub fn new(user: Option<AuthUser>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            user,
        }
    }

    pub fn anonymous() -> Self {
        Self::new(None)
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }

    /// Username for log lines
    pub fn actor(&self) -> &str {
        self.username().unwrap_or("anonymous")
    }
}
