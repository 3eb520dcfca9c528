//! Mutation action pipeline.
//!
//! One pipeline for every form submission: coerce numeric-looking text,
//! validate against the resource schema, run the call, invalidate the views
//! the mutation affects, and fold the result into an [`ActionState`] the
//! form layer can render. Validation failures and backend errors never
//! escape as `Err`; they come back as failed states.

use crate::resource::ApiResource;
use crate::views::ViewCache;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shopfront_schema::Schema;
use shopfront_transport::client::Method;
use shopfront_types::envelope::ApiEnvelope;
use shopfront_types::error::ApiError;
use shopfront_types::form::{FieldValue, FormValues};
use shopfront_types::payload::Payload;
use shopfront_types::state::ActionState;
use tracing::{debug, warn};

const MISSING_ID_MESSAGE: &str = "ID is required";

/// Per-action settings shared by create, update, and delete actions.
#[derive(Debug, Clone)]
pub struct ActionOptions<'a> {
    /// Views to invalidate after a successful mutation.
    pub views: &'a [&'a str],
    /// Cache holding the view generations, if the caller keeps one.
    pub cache: Option<&'a ViewCache>,
    /// Submission field carrying the entity identifier.
    pub id_field: &'a str,
    /// Verb used for updates.
    pub method: crate::resource::UpdateMethod,
}

impl Default for ActionOptions<'_> {
    fn default() -> Self {
        Self {
            views: &[],
            cache: None,
            id_field: "id",
            method: crate::resource::UpdateMethod::Put,
        }
    }
}

impl<'a> ActionOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidating(cache: &'a ViewCache, views: &'a [&'a str]) -> Self {
        Self {
            views,
            cache: Some(cache),
            ..Self::default()
        }
    }

    pub fn with_id_field(mut self, id_field: &'a str) -> Self {
        self.id_field = id_field;
        self
    }

    pub fn with_method(mut self, method: crate::resource::UpdateMethod) -> Self {
        self.method = method;
        self
    }
}

impl<T, C, U> ApiResource<T, C, U>
where
    T: DeserializeOwned,
{
    /// Validate a submission and create an entity from it.
    pub fn create_action(
        &self,
        mut values: FormValues,
        schema: &Schema,
        options: &ActionOptions,
    ) -> ActionState {
        values.coerce_numeric_strings();
        if let Err(errors) = schema.validate(&values) {
            debug!(path = self.base_path(), ?errors, "create submission rejected");
            return ActionState::failed(errors);
        }
        let path = self.base_path().to_string();
        self.finish(
            options,
            self.send_raw(&path, Method::Post, Payload::Form(values)),
        )
    }

    /// Validate a submission and update the entity it identifies.
    ///
    /// The identifier is read from `options.id_field`; a submission without
    /// a numeric identifier fails before any call is made.
    pub fn update_action(
        &self,
        mut values: FormValues,
        schema: &Schema,
        options: &ActionOptions,
    ) -> ActionState {
        let Some(id) = extract_id(&values, options.id_field) else {
            return ActionState::field_error("id", MISSING_ID_MESSAGE);
        };
        values.set(options.id_field, FieldValue::Integer(id));
        values.coerce_numeric_strings();
        if let Err(errors) = schema.validate(&values) {
            debug!(path = self.base_path(), id, ?errors, "update submission rejected");
            return ActionState::failed(errors);
        }
        let path = self.item_path(id);
        self.finish(
            options,
            self.send_raw(&path, options.method.into(), Payload::Form(values)),
        )
    }

    /// Delete the entity a submission identifies. No schema runs here; the
    /// only input that matters is the identifier.
    pub fn delete_action(&self, values: &FormValues, options: &ActionOptions) -> ActionState {
        let Some(id) = extract_id(values, options.id_field) else {
            return ActionState::field_error("id", MISSING_ID_MESSAGE);
        };
        self.finish(options, self.delete(id))
    }

    fn finish(
        &self,
        options: &ActionOptions,
        result: Result<ApiEnvelope<Value>, ApiError>,
    ) -> ActionState {
        match result {
            Ok(envelope) => {
                if let Some(cache) = options.cache {
                    cache.invalidate_all(options.views);
                }
                ActionState::succeeded(envelope)
            }
            Err(error) => {
                warn!(path = self.base_path(), error = %error, "mutation failed");
                ActionState::general_error(error.message())
            }
        }
    }
}

/// Numeric identifier from a submission, if one was sent. Text is parsed,
/// whole floats are accepted, anything else is absent.
fn extract_id(values: &FormValues, id_field: &str) -> Option<i64> {
    match values.get(id_field)? {
        FieldValue::Integer(n) => Some(*n),
        FieldValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
        FieldValue::Text(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::UpdateMethod;
    use shopfront_transport::{DeviceContext, HttpTransport, MemoryCredentialStore};
    use std::sync::Arc;

    fn resource() -> ApiResource<Value> {
        // Port 9 refuses connections; only the no-network paths are tested.
        let transport = Arc::new(HttpTransport::new(
            "http://127.0.0.1:9",
            Arc::new(MemoryCredentialStore::new()),
            DeviceContext::default(),
        ));
        ApiResource::new(transport, "api/v1/products", false)
    }

    fn schema() -> Schema {
        Schema::new()
            .required_text("name", 1, 120)
            .required_number("price", Some(0.0), Some(1_000_000.0))
    }

    #[test]
    fn test_create_action_rejects_invalid_submission() {
        let values = FormValues::new().with("name", "").with("price", "19.99");
        let state = resource().create_action(values, &schema(), &ActionOptions::default());
        assert!(!state.success);
        assert!(!state.errors_for("name").is_empty());
        assert!(state.errors_for("price").is_empty());
    }

    #[test]
    fn test_update_action_requires_an_id() {
        let values = FormValues::new().with("name", "Widget").with("price", "19.99");
        let state = resource().update_action(values, &schema(), &ActionOptions::default());
        assert!(!state.success);
        assert_eq!(state.errors_for("id"), ["ID is required"]);
    }

    #[test]
    fn test_update_action_rejects_non_numeric_id() {
        let values = FormValues::new().with("id", "abc").with("name", "Widget");
        let state = resource().update_action(values, &schema(), &ActionOptions::default());
        assert_eq!(state.errors_for("id"), ["ID is required"]);
    }

    #[test]
    fn test_delete_action_requires_an_id() {
        let state = resource().delete_action(&FormValues::new(), &ActionOptions::default());
        assert!(!state.success);
        assert_eq!(state.errors_for("id"), ["ID is required"]);
    }

    #[test]
    fn test_backend_failure_becomes_general_error() {
        let values = FormValues::new().with("name", "Widget").with("price", "19.99");
        let state = resource().create_action(values, &schema(), &ActionOptions::default());
        assert!(!state.success);
        assert!(state.general_message().is_some());
    }

    #[test]
    fn test_extract_id_forms() {
        let values = FormValues::new()
            .with("a", FieldValue::Integer(7))
            .with("b", "12")
            .with("c", FieldValue::Float(3.0))
            .with("d", FieldValue::Float(3.5))
            .with("e", "abc");
        assert_eq!(extract_id(&values, "a"), Some(7));
        assert_eq!(extract_id(&values, "b"), Some(12));
        assert_eq!(extract_id(&values, "c"), Some(3));
        assert_eq!(extract_id(&values, "d"), None);
        assert_eq!(extract_id(&values, "e"), None);
        assert_eq!(extract_id(&values, "missing"), None);
    }

    #[test]
    fn test_options_builder() {
        let cache = ViewCache::new();
        let views = ["/products"];
        let options = ActionOptions::invalidating(&cache, &views)
            .with_id_field("productId")
            .with_method(UpdateMethod::Post);
        assert_eq!(options.id_field, "productId");
        assert_eq!(options.method, UpdateMethod::Post);
        assert!(options.cache.is_some());
    }
}
