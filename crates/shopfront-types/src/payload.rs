//! Request payload abstraction.
//!
//! A mutation payload is either a JSON object or an ordered form (which may
//! carry attachments). The resource client decides the wire encoding: JSON
//! resources serialize the object, binary-capable resources encode
//! multipart. Empty and null values never reach the wire in either form.

use crate::error::ApiError;
use crate::form::{FieldValue, FormValues};
use serde::Serialize;
use serde_json::{Map, Value};

/// A mutation payload, prior to wire encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Map<String, Value>),
    Form(FormValues),
}

impl Payload {
    /// Build a JSON payload from any serializable value. The value must
    /// serialize to an object; null and empty-string members are dropped.
    pub fn from_serialize<S: Serialize>(value: &S) -> Result<Payload, ApiError> {
        let value = serde_json::to_value(value)
            .map_err(|e| ApiError::BadRequest(format!("unserializable payload: {e}")))?;
        match value {
            Value::Object(map) => Ok(Payload::Json(strip_empty(map))),
            other => Err(ApiError::BadRequest(format!(
                "payload must be an object, got {other}"
            ))),
        }
    }

    /// An empty JSON object payload (e.g. bodyless POST sub-actions).
    pub fn empty() -> Payload {
        Payload::Json(Map::new())
    }

    /// The payload as a JSON object for a non-binary resource.
    ///
    /// Form payloads convert scalar-by-scalar; an attachment in a JSON-only
    /// resource is a caller bug and is rejected.
    pub fn into_json_map(self) -> Result<Map<String, Value>, ApiError> {
        match self {
            Payload::Json(map) => Ok(map),
            Payload::Form(values) => {
                if values.has_files() {
                    return Err(ApiError::BadRequest(
                        "file attachments require a multipart-capable resource".to_string(),
                    ));
                }
                Ok(values.to_json_map())
            }
        }
    }

    /// The payload as ordered form values for a multipart resource.
    pub fn into_form_values(self) -> FormValues {
        match self {
            Payload::Form(values) => values,
            Payload::Json(map) => {
                let mut values = FormValues::new();
                for (name, value) in map {
                    values.set(name, field_value_from_json(value));
                }
                values
            }
        }
    }
}

fn strip_empty(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .filter(|(_, v)| !matches!(v, Value::Null) && v.as_str() != Some(""))
        .collect()
}

fn field_value_from_json(value: Value) -> FieldValue {
    match value {
        Value::String(s) => FieldValue::Text(s),
        Value::Bool(b) => FieldValue::Bool(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Integer(i)
            } else {
                FieldValue::Float(n.as_f64().unwrap_or_default())
            }
        }
        Value::Null => FieldValue::Null,
        // Nested structures are sent as their JSON text, one part per key.
        other => FieldValue::Text(other.to_string()),
    }
}

/// Conversion into a [`Payload`]. Implemented for [`FormValues`] directly
/// and, via [`json_payload!`], for serializable input DTOs.
pub trait IntoPayload {
    fn into_payload(self) -> Result<Payload, ApiError>;
}

impl IntoPayload for Payload {
    fn into_payload(self) -> Result<Payload, ApiError> {
        Ok(self)
    }
}

impl IntoPayload for FormValues {
    fn into_payload(self) -> Result<Payload, ApiError> {
        Ok(Payload::Form(self))
    }
}

impl IntoPayload for () {
    fn into_payload(self) -> Result<Payload, ApiError> {
        Ok(Payload::empty())
    }
}

/// Implement [`IntoPayload`] for serializable input DTOs.
///
/// A blanket impl over `Serialize` would collide with the `FormValues`
/// impl, so DTOs opt in explicitly.
#[macro_export]
macro_rules! json_payload {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::payload::IntoPayload for $ty {
                fn into_payload(self) -> Result<$crate::payload::Payload, $crate::error::ApiError> {
                    $crate::payload::Payload::from_serialize(&self)
                }
            }
        )+
    };
}
