// HTTP API Error Types
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Map, Value};

use crate::database::DatabaseError;
use crate::validation::FieldError;

/// HTTP API error; every failure a request can end in is one of these.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    ValidationError { field_errors: Vec<FieldError> },
    IllegalArgument(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),
    NoRoute { method: String, path: String },

    // 405 Method Not Allowed
    MethodNotAllowed { method: String, allowed: Vec<String> },

    // 500 Internal Server Error
    Runtime(String),
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::ValidationError { .. } => 400,
            ApiError::IllegalArgument(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::NoRoute { .. } => 404,
            ApiError::MethodNotAllowed { .. } => 405,
            ApiError::Runtime(_) => 500,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Client-facing summary of the failure category
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::ValidationError { .. } => "Some fields are invalid. Please correct and try again.",
            ApiError::IllegalArgument(_) => "Invalid input provided.",
            ApiError::Unauthorized(_) => "Full authentication is required to access this resource.",
            ApiError::Forbidden(_) => "You are not authorized to perform this action.",
            ApiError::NotFound(_) => "The item you're looking for doesn't exist.",
            ApiError::NoRoute { .. } => "The endpoint you requested does not exist.",
            ApiError::MethodNotAllowed { .. } => "The HTTP method used is not supported for this endpoint.",
            ApiError::Runtime(_) => "Something went wrong. Please try again later.",
            ApiError::InternalServerError(_) => "An unexpected error occurred.",
        }
    }

    /// Specific cause of the failure; a field map for validation errors
    pub fn details(&self) -> Value {
        match self {
            ApiError::ValidationError { field_errors } => {
                let map: Map<String, Value> = field_errors
                    .iter()
                    .map(|e| (e.field.clone(), Value::String(e.message.clone())))
                    .collect();
                Value::Object(map)
            }
            ApiError::NoRoute { method, path } => json!(format!("No handler found for {} {}", method, path)),
            ApiError::MethodNotAllowed { method, .. } => json!(format!("Method '{}' is not allowed here.", method)),
            ApiError::IllegalArgument(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Runtime(msg)
            | ApiError::InternalServerError(msg) => json!(msg),
        }
    }

    pub fn suggestion(&self) -> String {
        match self {
            ApiError::ValidationError { .. } => "Ensure all required fields are filled with valid values.".to_string(),
            ApiError::IllegalArgument(_) => "Review your request payload and ensure all values are correct.".to_string(),
            ApiError::Unauthorized(_) => "Provide valid HTTP Basic credentials.".to_string(),
            ApiError::Forbidden(_) => "Check your permissions or login credentials.".to_string(),
            ApiError::NotFound(_) => "Double-check the item ID or resource path.".to_string(),
            ApiError::NoRoute { .. } => "Please verify the URL and HTTP method.".to_string(),
            ApiError::MethodNotAllowed { allowed, .. } => {
                format!("Try changing the method to one of: [{}]", allowed.join(", "))
            }
            ApiError::Runtime(_) => "If the issue persists, contact support.".to_string(),
            ApiError::InternalServerError(_) => "Please contact support or check your request.".to_string(),
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::IllegalArgument(_) => "ILLEGAL_ARGUMENT",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::NoRoute { .. } => "NO_ROUTE",
            ApiError::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
            ApiError::Runtime(_) => "RUNTIME_ERROR",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let status = self.http_status();
        json!({
            "status": "error",
            "code": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("Unknown"),
            "message": self.message(),
            "details": self.details(),
            "suggestion": self.suggestion(),
            "timestamp": chrono::Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
        })
    }

    fn http_status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Every category is logged before the response leaves
    fn log(&self) {
        match self {
            ApiError::ValidationError { .. } => {
                tracing::warn!(code = self.error_code(), "Validation failed: {}", self.details())
            }
            ApiError::IllegalArgument(msg) => tracing::warn!(code = self.error_code(), "Invalid input: {}", msg),
            ApiError::Unauthorized(msg) => tracing::warn!(code = self.error_code(), "Authentication failed: {}", msg),
            ApiError::Forbidden(msg) => tracing::error!(code = self.error_code(), "Security violation: {}", msg),
            ApiError::NotFound(msg) => tracing::error!(code = self.error_code(), "Resource not found: {}", msg),
            ApiError::NoRoute { method, path } => {
                tracing::warn!(code = self.error_code(), "Invalid endpoint: {} {}", method, path)
            }
            ApiError::MethodNotAllowed { method, .. } => {
                tracing::warn!(code = self.error_code(), "Method not allowed: {}", method)
            }
            ApiError::Runtime(msg) => tracing::error!(code = self.error_code(), "Unexpected error: {}", msg),
            ApiError::InternalServerError(msg) => {
                tracing::error!(code = self.error_code(), "Unhandled exception: {}", msg)
            }
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn validation_error(field_errors: Vec<FieldError>) -> Self {
        ApiError::ValidationError { field_errors }
    }

    pub fn illegal_argument(message: impl Into<String>) -> Self {
        ApiError::IllegalArgument(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn no_route(method: impl Into<String>, path: impl Into<String>) -> Self {
        ApiError::NoRoute {
            method: method.into(),
            path: path.into(),
        }
    }

    pub fn method_not_allowed(method: impl Into<String>, allowed: Vec<String>) -> Self {
        ApiError::MethodNotAllowed {
            method: method.into(),
            allowed,
        }
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        ApiError::Runtime(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

// Convert other error types to ApiError
impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Duplicate(msg) => ApiError::runtime(msg),
            DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
            other => {
                tracing::error!("Database error: {}", other);
                ApiError::internal_server_error("Database error occurred")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::illegal_argument(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::illegal_argument(rejection.body_text())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.details() {
            Value::String(details) => write!(f, "{}: {}", self.message(), details),
            other => write!(f, "{}: {}", self.message(), other),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        self.log();

        let mut response = (self.http_status(), Json(self.to_json())).into_response();

        match &self {
            ApiError::Unauthorized(_) => {
                let challenge = format!("Basic realm=\"{}\"", crate::config::config().security.realm);
                if let Ok(value) = HeaderValue::from_str(&challenge) {
                    response.headers_mut().insert(header::WWW_AUTHENTICATE, value);
                }
            }
            ApiError::MethodNotAllowed { allowed, .. } if !allowed.is_empty() => {
                if let Ok(value) = HeaderValue::from_str(&allowed.join(", ")) {
                    response.headers_mut().insert(header::ALLOW, value);
                }
            }
            _ => {}
        }

        response
    }
}
