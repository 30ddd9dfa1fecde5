//! Field validation for incoming payloads.
//!
//! Payloads implement [`Validate`]; handlers call [`ensure_valid`] before doing
//! any work so a bad payload never reaches a service.

use serde::Serialize;

use crate::error::ApiError;

/// A single rejected field and the reason it was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub trait Validate {
    /// Every violation found, in field order. Empty means valid.
    fn validate(&self) -> Vec<FieldError>;
}

/// Runs the payload's validation and turns any violations into a 400
pub fn ensure_valid<T: Validate>(payload: &T) -> Result<(), ApiError> {
    let errors = payload.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error(errors))
    }
}

/// Collects field errors with the usual constraint checks
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Present and not whitespace-only
    pub fn not_blank(&mut self, field: &str, value: Option<&str>, message: &str) -> &mut Self {
        if !value.map(|v| !v.trim().is_empty()).unwrap_or(false) {
            self.push(field, message);
        }
        self
    }

    /// When present, must not be whitespace-only
    pub fn not_blank_if_present(&mut self, field: &str, value: Option<&str>, message: &str) -> &mut Self {
        if value.is_some() {
            self.not_blank(field, value, message);
        }
        self
    }

    pub fn not_null<T>(&mut self, field: &str, value: Option<&T>, message: &str) -> &mut Self {
        if value.is_none() {
            self.push(field, message);
        }
        self
    }

    /// When present, must be at least `min`
    pub fn min(&mut self, field: &str, value: Option<i32>, min: i32, message: &str) -> &mut Self {
        if matches!(value, Some(v) if v < min) {
            self.push(field, message);
        }
        self
    }

    /// When present, must equal one of `allowed` exactly
    pub fn one_of(&mut self, field: &str, value: Option<&str>, allowed: &[&str], message: &str) -> &mut Self {
        if let Some(v) = value {
            if !allowed.contains(&v) {
                self.push(field, message);
            }
        }
        self
    }

    pub fn push(&mut self, field: &str, message: &str) -> &mut Self {
        self.errors.push(FieldError::new(field, message));
        self
    }

    pub fn finish(&mut self) -> Vec<FieldError> {
        std::mem::take(&mut self.errors)
    }
}
