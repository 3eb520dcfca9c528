//! HTTP transport.
//!
//! One request entry point used by every resource client. The transport
//! attaches content negotiation, bearer token, and device context headers,
//! classifies the response as JSON, binary, or text, persists session
//! tokens returned by the authentication endpoints, and maps non-success
//! statuses to the typed error set.

use crate::device::DeviceContext;
use crate::multipart::encode_form;
use crate::session::{Credential, CredentialStore};
use serde_json::{Map, Value};
use shopfront_types::error::{extract_error_message, ApiError};
use shopfront_types::form::FormValues;
use std::io::Read;
use std::sync::Arc;
use tracing::{debug, warn};

/// Auth endpoints whose successful responses carry a session token.
const AUTH_PATHS: [&str; 3] = ["/auth/login", "/auth/register", "/auth/refresh-token"];

/// HTTP methods the backend contract uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Outgoing request body.
#[derive(Debug, Clone, Default)]
pub enum HttpBody {
    #[default]
    Empty,
    Json(Map<String, Value>),
    Multipart(FormValues),
}

/// What the caller expects back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseKind {
    #[default]
    Json,
    Binary,
    Text,
}

/// Options for one request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: HttpBody,
    pub expect: ResponseKind,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn delete() -> Self {
        Self {
            method: Method::Delete,
            ..Self::default()
        }
    }

    pub fn json(method: Method, body: Map<String, Value>) -> Self {
        Self {
            method,
            body: HttpBody::Json(body),
            expect: ResponseKind::Json,
        }
    }

    pub fn multipart(method: Method, values: FormValues) -> Self {
        Self {
            method,
            body: HttpBody::Multipart(values),
            expect: ResponseKind::Json,
        }
    }

    pub fn binary() -> Self {
        Self {
            expect: ResponseKind::Binary,
            ..Self::default()
        }
    }
}

/// Classified response.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpResponse {
    Json(Value),
    Binary {
        bytes: Vec<u8>,
        content_type: String,
        filename: Option<String>,
    },
    Text(String),
    /// 204 on a delete: success with no body to parse.
    NoContent,
}

impl HttpResponse {
    /// The JSON body, or a typed error when the response was not JSON.
    pub fn into_json(self) -> Result<Value, ApiError> {
        match self {
            HttpResponse::Json(value) => Ok(value),
            other => Err(ApiError::BadRequest(format!(
                "expected a JSON response, got {other:?}"
            ))),
        }
    }
}

/// Transport handle over one backend base URL.
///
/// Holds the shared credential store (the only component allowed to write
/// it) and the device context echoed on every call.
pub struct HttpTransport {
    base_url: String,
    agent: ureq::Agent,
    credentials: Arc<dyn CredentialStore>,
    device: DeviceContext,
}

impl HttpTransport {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialStore>,
        device: DeviceContext,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            agent: ureq::Agent::new(),
            credentials,
            device,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    pub fn device(&self) -> &DeviceContext {
        &self.device
    }

    /// Perform one call against `path` (which must start with `/`).
    ///
    /// Non-2xx statuses become typed errors carrying a message extracted
    /// from the response body. A 204 answer to a delete is a success with
    /// no content.
    pub fn request(&self, path: &str, options: RequestOptions) -> Result<HttpResponse, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.agent.request(options.method.as_str(), &url);

        request = request.set(
            "Accept",
            match options.expect {
                ResponseKind::Binary => "*/*",
                _ => "application/json",
            },
        );
        // Multipart sets its own Content-Type with the boundary below.
        if !matches!(options.body, HttpBody::Multipart(_)) {
            request = request.set("Content-Type", "application/json");
        }
        request = request
            .set("User-Agent", &self.device.user_agent)
            .set("X-Forwarded-For", &self.device.ip_address);
        if let Some(credential) = self.credentials.get() {
            request = request.set("Authorization", &format!("Bearer {}", credential.token));
        }

        debug!(method = options.method.as_str(), %url, "sending request");
        let result = match &options.body {
            HttpBody::Empty => request.call(),
            HttpBody::Json(map) => {
                let body = Value::Object(map.clone()).to_string();
                request.send_string(&body)
            }
            HttpBody::Multipart(values) => {
                let encoded = encode_form(values);
                request
                    .set("Content-Type", &encoded.content_type)
                    .send_bytes(&encoded.bytes)
            }
        };

        match result {
            Ok(response) => self.classify_response(path, &options, response),
            Err(ureq::Error::Status(status, response)) => {
                let body = read_body(response);
                let message = extract_error_message(&body, status);
                warn!(status, %url, %message, "request failed");
                if status == 401 {
                    // An authentication failure invalidates the session.
                    self.credentials.clear();
                }
                Err(ApiError::from_status(status, message))
            }
            Err(ureq::Error::Transport(transport)) => {
                warn!(%url, error = %transport, "transport failure");
                Err(ApiError::Unknown {
                    status: 0,
                    message: format!("transport error: {transport}"),
                })
            }
        }
    }

    /// Download a binary sub-resource: the raw bytes plus a filename taken
    /// from `Content-Disposition`, defaulting to `download`.
    pub fn download(&self, path: &str) -> Result<(Vec<u8>, String), ApiError> {
        match self.request(path, RequestOptions::binary())? {
            HttpResponse::Binary {
                bytes, filename, ..
            } => Ok((bytes, filename.unwrap_or_else(|| "download".to_string()))),
            HttpResponse::Text(text) => Ok((text.into_bytes(), "download".to_string())),
            other => Err(ApiError::BadRequest(format!(
                "expected a binary response, got {other:?}"
            ))),
        }
    }

    fn classify_response(
        &self,
        path: &str,
        options: &RequestOptions,
        response: ureq::Response,
    ) -> Result<HttpResponse, ApiError> {
        let status = response.status();
        if status == 204 && options.method == Method::Delete {
            debug!(%path, "delete returned no content");
            return Ok(HttpResponse::NoContent);
        }

        let content_type = response.content_type().to_string();
        let is_binary =
            options.expect == ResponseKind::Binary || is_binary_content_type(&content_type);
        debug!(status, %path, %content_type, "response received");

        if is_binary {
            let filename = response
                .header("Content-Disposition")
                .and_then(parse_disposition_filename);
            let mut bytes = Vec::new();
            response
                .into_reader()
                .read_to_end(&mut bytes)
                .map_err(|e| ApiError::Unknown {
                    status,
                    message: format!("failed to read binary response: {e}"),
                })?;
            return Ok(HttpResponse::Binary {
                bytes,
                content_type,
                filename,
            });
        }

        if options.expect == ResponseKind::Text {
            let text = response.into_string().map_err(|e| ApiError::Unknown {
                status,
                message: format!("failed to read text response: {e}"),
            })?;
            return Ok(HttpResponse::Text(text));
        }

        let body: Value = response.into_json().map_err(|e| ApiError::Unknown {
            status,
            message: format!("invalid JSON response: {e}"),
        })?;
        if is_auth_path(path) {
            self.persist_session(&body);
        }
        Ok(HttpResponse::Json(body))
    }

    /// Persist the token and role a successful auth response carries; a
    /// response without a token clears any stored credential.
    fn persist_session(&self, body: &Value) {
        let token = body
            .pointer("/data/token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty());
        match token {
            Some(token) => {
                let role = extract_role(body);
                debug!(role = %role, "persisting session credential");
                self.credentials
                    .set(Credential::with_default_ttl(token, role));
            }
            None => {
                debug!("auth response without token, clearing credential");
                self.credentials.clear();
            }
        }
    }
}

fn is_auth_path(path: &str) -> bool {
    AUTH_PATHS.iter().any(|auth| path.contains(auth))
}

/// The role marker may arrive as a plain string or as a list of roles; the
/// first role wins.
fn extract_role(body: &Value) -> String {
    match body.pointer("/data/user/roles") {
        Some(Value::String(role)) => role.clone(),
        Some(Value::Array(roles)) => roles
            .first()
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

fn is_binary_content_type(content_type: &str) -> bool {
    content_type.starts_with("image/")
        || content_type.starts_with("video/")
        || content_type.starts_with("audio/")
        || content_type == "application/pdf"
        || content_type == "application/octet-stream"
        || (content_type.starts_with("application/") && !content_type.contains("json"))
}

fn parse_disposition_filename(header: &str) -> Option<String> {
    let (_, rest) = header.split_once("filename=")?;
    let rest = rest.trim();
    let name = rest
        .split(';')
        .next()
        .unwrap_or(rest)
        .trim()
        .trim_matches('"');
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn read_body(response: ureq::Response) -> Vec<u8> {
    let mut bytes = Vec::new();
    if let Err(e) = response.into_reader().read_to_end(&mut bytes) {
        warn!(error = %e, "failed to read error response body");
    }
    bytes
}
