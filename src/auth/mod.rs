//! Access rules and HTTP Basic credential handling.
//!
//! Rules are checked in declaration order and the first match wins, so the
//! open signup route has to come before the `/users/**` admin rule.

use axum::http::Method;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// What a request needs before it reaches a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anonymous callers allowed
    PermitAll,
    /// Any authenticated caller
    Authenticated,
    /// Authenticated and holding one of these roles (without the `ROLE_` prefix)
    AnyRole(&'static [&'static str]),
}

struct AccessRule {
    method: Option<Method>,
    pattern: PathPattern,
    access: Access,
}

enum PathPattern {
    /// Matches the path exactly
    Exact(&'static str),
    /// Matches the prefix itself and everything below it (`/prefix/**`)
    Subtree(&'static str),
}

impl PathPattern {
    fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Exact(p) => path == *p,
            PathPattern::Subtree(prefix) => match path.strip_prefix(prefix) {
                Some(rest) => rest.is_empty() || rest.starts_with('/'),
                None => false,
            },
        }
    }
}

const USER_OR_ADMIN: &[&str] = &["USER", "ADMIN"];
const ADMIN_ONLY: &[&str] = &["ADMIN"];

fn rules() -> [AccessRule; 4] {
    [
        AccessRule {
            method: Some(Method::POST),
            pattern: PathPattern::Exact("/users"),
            access: Access::PermitAll,
        },
        AccessRule {
            method: None,
            pattern: PathPattern::Subtree("/items"),
            access: Access::AnyRole(USER_OR_ADMIN),
        },
        AccessRule {
            method: None,
            pattern: PathPattern::Subtree("/admin"),
            access: Access::AnyRole(ADMIN_ONLY),
        },
        AccessRule {
            method: None,
            pattern: PathPattern::Subtree("/users"),
            access: Access::AnyRole(ADMIN_ONLY),
        },
    ]
}

/// Access required for `method path`; unmatched requests need authentication
pub fn required_access(method: &Method, path: &str) -> Access {
    rules()
        .into_iter()
        .find(|rule| rule.method.as_ref().map_or(true, |m| m == method) && rule.pattern.matches(path))
        .map(|rule| rule.access)
        .unwrap_or(Access::Authenticated)
}

/// Username and password carried by an `Authorization: Basic` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Decode an `Authorization` header value of the form `Basic base64(user:pass)`
pub fn parse_basic_header(value: &str) -> Result<BasicCredentials, String> {
    let encoded = value
        .strip_prefix("Basic ")
        .or_else(|| value.strip_prefix("basic "))
        .ok_or_else(|| "Authorization header must use Basic scheme".to_string())?
        .trim();

    let decoded = STANDARD
        .decode(encoded)
        .map_err(|_| "Failed to decode basic authentication token".to_string())?;
    let decoded = String::from_utf8(decoded).map_err(|_| "Basic credentials are not valid UTF-8".to_string())?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or_else(|| "Invalid basic authentication token".to_string())?;

    Ok(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Passwords are stored in plain text, so this is a straight comparison.
pub fn password_matches(stored: &str, presented: &str) -> bool {
    stored == presented
}
