//! Typed error taxonomy for backend calls.
//!
//! Transport maps every non-success HTTP status to one member of a closed
//! error set, carrying a human-readable message extracted from the response
//! body. Message extraction is deterministic: field errors first (in field
//! name order), then a top-level `message`, then the raw body text, then a
//! generic fallback naming the status code.

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Per-field validation messages, keyed by field name.
///
/// A `BTreeMap` keeps iteration order stable by field name, so the "first"
/// field error is well defined.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Replacement text for leaked low-level storage errors.
const LEAKED_STORAGE_MESSAGE: &str = "invalid value, please try something else";

/// One typed failure per HTTP status class the backend emits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("unprocessable entity: {0}")]
    UnprocessableEntity(String),
    #[error("locked: {0}")]
    Locked(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
    #[error("request failed with status {status}: {message}")]
    Unknown { status: u16, message: String },
}

impl ApiError {
    /// Map an HTTP status code to its typed error, preserving the message.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            409 => ApiError::Conflict(message),
            422 => ApiError::UnprocessableEntity(message),
            423 => ApiError::Locked(message),
            500 => ApiError::InternalServerError(message),
            _ => ApiError::Unknown { status, message },
        }
    }

    /// The extracted human-readable message.
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(m)
            | ApiError::Unauthorized(m)
            | ApiError::Forbidden(m)
            | ApiError::NotFound(m)
            | ApiError::Conflict(m)
            | ApiError::UnprocessableEntity(m)
            | ApiError::InternalServerError(m)
            | ApiError::Locked(m) => m,
            ApiError::Unknown { message, .. } => message,
        }
    }

    /// True for 401 responses, which invalidate any stored credential.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}

/// Extract a display message from an error response body.
///
/// Order: if the body is JSON with an `errors` array, the first entry wins;
/// if `errors` is an object (field name -> message or message list), the
/// first field in key order wins; otherwise a top-level `message` string;
/// otherwise the raw body text; otherwise a generic message naming the
/// status. Messages that look like leaked storage errors (`SQLSTATE[...`)
/// are replaced with a generic one.
pub fn extract_error_message(body: &[u8], status: u16) -> String {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        if let Some(message) = message_from_json(&value) {
            return sanitize_message(message);
        }
    }
    match std::str::from_utf8(body) {
        Ok(text) if !text.trim().is_empty() => sanitize_message(text.trim().to_string()),
        _ => format!("request failed with status {status}"),
    }
}

fn message_from_json(value: &Value) -> Option<String> {
    match value.get("errors") {
        Some(Value::Array(entries)) => {
            if let Some(first) = entries.iter().find_map(first_message) {
                return Some(first);
            }
        }
        Some(Value::Object(fields)) => {
            if let Some(first) = fields.values().find_map(first_message) {
                return Some(first);
            }
        }
        _ => {}
    }
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(String::from)
}

/// First message inside a string or a list of strings.
fn first_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_message),
        _ => None,
    }
}

fn sanitize_message(message: String) -> String {
    if message.starts_with("SQLSTATE[") {
        LEAKED_STORAGE_MESSAGE.to_string()
    } else {
        message
    }
}
