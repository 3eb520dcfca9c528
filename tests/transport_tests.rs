//! Transport-level integration tests against the stub server: status
//! mapping, session persistence, header injection, and binary downloads.

mod common;

use common::{CannedResponse, StubServer};
use serde_json::json;
use shopfront_transport::{
    Credential, CredentialStore, DeviceContext, HttpResponse, HttpTransport,
    MemoryCredentialStore, Method, RequestOptions,
};
use shopfront_types::ApiError;
use std::sync::Arc;

fn transport(base_url: &str) -> (HttpTransport, Arc<MemoryCredentialStore>) {
    let store = Arc::new(MemoryCredentialStore::new());
    let transport = HttpTransport::new(base_url, store.clone(), DeviceContext::default());
    (transport, store)
}

#[test]
fn test_status_codes_map_to_typed_errors() {
    let statuses = [400u16, 401, 403, 404, 409, 422, 423, 500, 418];
    let responses = statuses
        .iter()
        .map(|status| {
            CannedResponse::json(*status, json!({"success": false, "message": "nope"}))
        })
        .collect();
    let server = StubServer::start(responses);
    let (transport, _) = transport(server.url());

    for status in statuses {
        let error = transport
            .request("/api/v1/products/", RequestOptions::get())
            .unwrap_err();
        let matched = match status {
            400 => matches!(error, ApiError::BadRequest(_)),
            401 => matches!(error, ApiError::Unauthorized(_)),
            403 => matches!(error, ApiError::Forbidden(_)),
            404 => matches!(error, ApiError::NotFound(_)),
            409 => matches!(error, ApiError::Conflict(_)),
            422 => matches!(error, ApiError::UnprocessableEntity(_)),
            423 => matches!(error, ApiError::Locked(_)),
            500 => matches!(error, ApiError::InternalServerError(_)),
            _ => matches!(error, ApiError::Unknown { status: 418, .. }),
        };
        assert!(matched, "status {status} produced {error:?}");
        assert_eq!(error.message(), "nope");
    }
}

#[test]
fn test_delete_204_is_success_without_body() {
    let server = StubServer::start(vec![CannedResponse::no_content()]);
    let (transport, _) = transport(server.url());

    let response = transport
        .request("/api/v1/users/9/", RequestOptions::delete())
        .unwrap();
    assert_eq!(response, HttpResponse::NoContent);

    let requests = server.finish();
    assert_eq!(requests[0].method, "DELETE");
    assert_eq!(requests[0].path, "/api/v1/users/9/");
}

#[test]
fn test_error_message_extracted_from_field_errors() {
    let body = json!({
        "success": false,
        "errors": {"email": ["email is already taken"], "name": ["name is required"]}
    });
    let server = StubServer::start(vec![CannedResponse::json(422, body)]);
    let (transport, _) = transport(server.url());

    let error = transport
        .request("/api/v1/users/", RequestOptions::get())
        .unwrap_err();
    // First field in key order wins.
    assert_eq!(error.message(), "email is already taken");
}

#[test]
fn test_login_persists_bearer_for_next_call() {
    let login_body = json!({
        "success": true,
        "data": {"token": "tok-123", "user": {"id": 1, "name": "Ada", "email": "a@b.co", "roles": "ROLE_ADMIN"}}
    });
    let list_body = json!({"success": true, "data": [], "meta": {}});
    let server = StubServer::start(vec![
        CannedResponse::json(200, login_body),
        CannedResponse::json(200, list_body),
    ]);
    let (transport, store) = transport(server.url());

    let mut credentials = serde_json::Map::new();
    credentials.insert("email".to_string(), json!("a@b.co"));
    credentials.insert("password".to_string(), json!("secret"));
    transport
        .request(
            "/api/v1/auth/login/",
            RequestOptions::json(Method::Post, credentials),
        )
        .unwrap();

    let stored = store.get().expect("credential persisted");
    assert_eq!(stored.token, "tok-123");
    assert_eq!(stored.role, "ROLE_ADMIN");

    transport
        .request("/api/v1/products/", RequestOptions::get())
        .unwrap();

    let requests = server.finish();
    assert!(requests[0].header("Authorization").is_none());
    assert_eq!(
        requests[1].header("Authorization"),
        Some("Bearer tok-123")
    );
}

#[test]
fn test_device_context_headers_are_sent() {
    let server = StubServer::start(vec![CannedResponse::json(200, json!({"success": true}))]);
    let store: Arc<MemoryCredentialStore> = Arc::new(MemoryCredentialStore::new());
    let device = DeviceContext::new("203.0.113.7", "storefront-tests/1.0");
    let transport = HttpTransport::new(server.url(), store, device);

    transport
        .request("/api/v1/products/1/", RequestOptions::get())
        .unwrap();

    let requests = server.finish();
    assert_eq!(requests[0].header("X-Forwarded-For"), Some("203.0.113.7"));
    assert_eq!(requests[0].header("User-Agent"), Some("storefront-tests/1.0"));
    assert_eq!(requests[0].header("Accept"), Some("application/json"));
}

#[test]
fn test_401_clears_stored_credential() {
    let server = StubServer::start(vec![CannedResponse::json(
        401,
        json!({"success": false, "message": "token expired"}),
    )]);
    let (transport, store) = transport(server.url());
    store.set(Credential::with_default_ttl("stale-token", "ROLE_USER"));

    let error = transport
        .request("/api/v1/orders/", RequestOptions::get())
        .unwrap_err();
    assert!(error.is_unauthorized());
    assert!(store.get().is_none());
}

#[test]
fn test_binary_download_carries_filename() {
    let server = StubServer::start(vec![CannedResponse::binary(
        "application/pdf",
        b"%PDF-1.4 stub".to_vec(),
        "invoice-42.pdf",
    )]);
    let (transport, _) = transport(server.url());

    let (bytes, filename) = transport.download("/api/v1/orders/42/invoice/").unwrap();
    assert_eq!(bytes, b"%PDF-1.4 stub");
    assert_eq!(filename, "invoice-42.pdf");
}
