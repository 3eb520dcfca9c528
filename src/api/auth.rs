//! Authentication API.
//!
//! Login, register, and refresh responses are intercepted by the transport,
//! which persists the returned token and role. Logout only clears the local
//! credential store; the backend has no logout endpoint.

use serde::Deserialize;
use shopfront_forms::FieldConfig;
use shopfront_resource::ApiResource;
use shopfront_schema::Schema;
use shopfront_transport::HttpTransport;
use shopfront_types::{
    ApiEnvelope, ApiError, AuthResponse, LoginInput, RegisterInput, User,
};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshedToken {
    pub token: String,
}

pub struct AuthApi {
    resource: ApiResource<AuthResponse>,
    transport: Arc<HttpTransport>,
}

impl AuthApi {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self {
            resource: ApiResource::new(transport.clone(), "api/v1/auth", false),
            transport,
        }
    }

    /// Authenticate. On success the transport has already stored the
    /// session credential.
    pub fn login(&self, input: LoginInput) -> Result<ApiEnvelope<AuthResponse>, ApiError> {
        self.resource.post_sub("login", input)
    }

    pub fn register(&self, input: RegisterInput) -> Result<ApiEnvelope<AuthResponse>, ApiError> {
        self.resource.post_sub("register", input)
    }

    /// Drop the local session credential.
    pub fn logout(&self) {
        self.transport.credentials().clear();
        info!("session credential cleared");
    }

    /// The authenticated user, or `None` when anonymous or the token is
    /// stale.
    pub fn me(&self) -> Option<User> {
        self.resource.get_sub("me")
    }

    pub fn refresh(&self) -> Result<ApiEnvelope<RefreshedToken>, ApiError> {
        self.resource.post_sub("refresh-token", ())
    }

    pub fn is_admin(&self) -> bool {
        self.me()
            .map(|user| user.roles.contains("ROLE_ADMIN"))
            .unwrap_or(false)
    }
}

pub fn login_schema() -> Schema {
    Schema::new().email("email").required_text("password", 6, 128)
}

pub fn register_schema() -> Schema {
    Schema::new()
        .required_text("name", 1, 120)
        .email("email")
        .required_text("password", 6, 128)
}

pub fn login_fields() -> Vec<FieldConfig> {
    vec![
        FieldConfig::text("email", "Email")
            .placeholder("name@example.com")
            .required(),
        FieldConfig::password("password", "Password").required(),
    ]
}

pub fn register_fields() -> Vec<FieldConfig> {
    vec![
        FieldConfig::text("name", "Name").required(),
        FieldConfig::text("email", "Email")
            .placeholder("name@example.com")
            .required(),
        FieldConfig::password("password", "Password").required(),
    ]
}
