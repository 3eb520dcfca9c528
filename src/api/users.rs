//! User administration API. Every call here requires `ROLE_ADMIN`.

use serde_json::Value;
use shopfront_forms::{ChoiceOption, FieldConfig};
use shopfront_resource::{ActionOptions, ApiResource, ViewCache};
use shopfront_schema::Schema;
use shopfront_transport::HttpTransport;
use shopfront_types::{
    ActionState, ApiEnvelope, ApiError, CreateUserInput, FormValues, PaginatedResponse,
    UpdateUserInput, User,
};
use std::sync::Arc;

pub const USER_VIEWS: [&str; 1] = ["/admin/users"];

const ROLES: [&str; 2] = ["ROLE_USER", "ROLE_ADMIN"];

pub struct UsersApi {
    resource: ApiResource<User, CreateUserInput, UpdateUserInput>,
    views: Arc<ViewCache>,
}

impl UsersApi {
    pub fn new(transport: Arc<HttpTransport>, views: Arc<ViewCache>) -> Self {
        Self {
            resource: ApiResource::new(transport, "api/v1/users", false),
            views,
        }
    }

    pub fn list(&self, page: u32, limit: u32, search: &str) -> PaginatedResponse<User> {
        self.resource.list_paginated(page, limit, search, true, true)
    }

    pub fn get(&self, id: i64) -> Option<User> {
        self.resource.get(id)
    }

    pub fn create(&self, input: CreateUserInput) -> Result<ApiEnvelope<User>, ApiError> {
        self.resource.create(input)
    }

    pub fn update(&self, id: i64, input: UpdateUserInput) -> Result<ApiEnvelope<User>, ApiError> {
        self.resource
            .update(id, input, shopfront_resource::UpdateMethod::Put)
    }

    pub fn delete(&self, id: i64) -> Result<ApiEnvelope<Value>, ApiError> {
        self.resource.delete(id)
    }

    pub fn create_action(&self, submission: FormValues) -> ActionState {
        let options = ActionOptions::invalidating(&self.views, &USER_VIEWS);
        self.resource
            .create_action(submission, &create_user_schema(), &options)
    }

    pub fn update_action(&self, submission: FormValues) -> ActionState {
        let options = ActionOptions::invalidating(&self.views, &USER_VIEWS);
        self.resource
            .update_action(submission, &update_user_schema(), &options)
    }

    pub fn delete_action(&self, submission: &FormValues) -> ActionState {
        let options = ActionOptions::invalidating(&self.views, &USER_VIEWS);
        self.resource.delete_action(submission, &options)
    }
}

pub fn create_user_schema() -> Schema {
    Schema::new()
        .required_text("name", 1, 120)
        .email("email")
        .required_text("password", 6, 128)
        .one_of("roles", &ROLES)
}

pub fn update_user_schema() -> Schema {
    Schema::new()
        .field("id", true, shopfront_schema::ValueRule::Number {
            min: None,
            max: None,
            integer: true,
        })
        .optional_text("name", 120)
        .field("email", false, shopfront_schema::ValueRule::Email)
}

pub fn create_user_fields() -> Vec<FieldConfig> {
    vec![
        FieldConfig::text("name", "Name").required(),
        FieldConfig::text("email", "Email").placeholder("name@example.com").required(),
        FieldConfig::password("password", "Password").required(),
        FieldConfig::choice(
            "roles",
            "Role",
            ROLES.iter().map(|r| ChoiceOption::new(*r, *r)).collect(),
        )
        .required(),
    ]
}

pub fn update_user_fields() -> Vec<FieldConfig> {
    vec![
        FieldConfig::hidden("id").required(),
        FieldConfig::text("name", "Name"),
        FieldConfig::text("email", "Email"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_schema_rejects_short_password() {
        let values = FormValues::new()
            .with("name", "Ada")
            .with("email", "ada@example.com")
            .with("password", "abc")
            .with("roles", "ROLE_USER");
        let errors = create_user_schema().validate(&values).unwrap_err();
        assert!(errors.contains_key("password"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_update_schema_email_is_optional() {
        let values = FormValues::new().with("id", 1i64);
        assert!(update_user_schema().validate(&values).is_ok());
    }
}
