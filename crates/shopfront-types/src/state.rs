//! Mutation outcome state.
//!
//! One `ActionState` is produced per submission and consumed by the form
//! layer to surface success or per-field errors. States are built fresh,
//! never mutated in place: `success == true` implies no errors, and a
//! failed state carries field errors and/or a general message.

use crate::envelope::ApiEnvelope;
use crate::error::FieldErrors;
use serde_json::Value;

/// Key under which non-field errors are reported.
pub const GENERAL_ERROR_KEY: &str = "general";

/// Outcome of one mutation attempt.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActionState {
    pub success: bool,
    pub errors: FieldErrors,
    pub data: Option<ApiEnvelope<Value>>,
}

impl ActionState {
    /// The state a form starts from, before any submission.
    pub fn initial() -> Self {
        Self::default()
    }

    /// Successful outcome carrying the response envelope.
    pub fn succeeded(data: ApiEnvelope<Value>) -> Self {
        Self {
            success: true,
            errors: FieldErrors::new(),
            data: Some(data),
        }
    }

    /// Failed outcome with per-field messages.
    pub fn failed(errors: FieldErrors) -> Self {
        Self {
            success: false,
            errors,
            data: None,
        }
    }

    /// Failed outcome with a single field message.
    pub fn field_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.into(), vec![message.into()]);
        Self::failed(errors)
    }

    /// Failed outcome with a general (non-field) message.
    pub fn general_error(message: impl Into<String>) -> Self {
        Self::field_error(GENERAL_ERROR_KEY, message)
    }

    /// Messages for one field, empty when the field has none.
    pub fn errors_for(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The general error message, if any.
    pub fn general_message(&self) -> Option<&str> {
        self.errors_for(GENERAL_ERROR_KEY)
            .first()
            .map(String::as_str)
    }
}
