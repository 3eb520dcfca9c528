//! Resource-level integration tests through the storefront façade: payload
//! encoding, read-path degradation, pagination, and the action pipeline.

mod common;

use common::{CannedResponse, StubServer};
use serde_json::json;
use shopfront::{
    Config, DeviceContext, FileAttachment, FileCredentialStore, FormValues, Shopfront,
};
use shopfront_types::{CreateUserInput, User};
use std::sync::Arc;

fn shop(base_url: &str) -> Shopfront {
    Shopfront::new(Config::new(base_url, "http://localhost:8000/storage/"))
}

fn product_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "description": "test product",
        "price": 19.99,
        "category": "Toys",
        "imageUrl": "products/widget.png",
        "stockQuantity": 5,
        "active": true
    })
}

#[test]
fn test_empty_collection_paginates_without_raising() {
    let body = json!({
        "success": true,
        "data": [],
        "meta": {"pagination": {"page": 1, "limit": 10, "total": 0, "totalPages": 0}}
    });
    let server = StubServer::start(vec![CannedResponse::json(200, body)]);
    let shop = shop(server.url());

    let page = shop.products().list(1, 10, "");
    assert!(page.data.is_empty());
    let pagination = page.pagination();
    assert_eq!(pagination.total, 0);
    assert_eq!(pagination.total_pages, 0);

    let requests = server.finish();
    assert_eq!(
        requests[0].path,
        "/api/v1/products/?page=1&limit=10&search=&admin=false&paginated=true"
    );
}

#[test]
fn test_read_paths_degrade_on_server_errors() {
    let error_body = json!({"success": false, "message": "boom"});
    let server = StubServer::start(vec![
        CannedResponse::json(500, error_body.clone()),
        CannedResponse::json(500, error_body),
    ]);
    let shop = shop(server.url());

    assert!(shop.products().get(1).is_none());
    assert!(shop.products().all().is_empty());
}

#[test]
fn test_create_then_get_round_trips() {
    let user = json!({"id": 7, "name": "Ada", "email": "ada@example.com", "roles": "ROLE_USER"});
    let server = StubServer::start(vec![
        CannedResponse::json(201, json!({"success": true, "data": user})),
        CannedResponse::json(200, json!({"success": true, "data": user})),
    ]);
    let shop = shop(server.url());

    let created = shop
        .users()
        .create(CreateUserInput {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret99".to_string(),
            roles: "ROLE_USER".to_string(),
        })
        .unwrap();
    let created: User = created.data.unwrap();
    let fetched = shop.users().get(created.id).unwrap();
    assert_eq!(created, fetched);

    let requests = server.finish();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/v1/users/");
    assert_eq!(requests[0].header("Content-Type"), Some("application/json"));
    // The JSON body carries exactly the supplied keys.
    let body = requests[0].body_json();
    let keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 4);
    assert_eq!(requests[1].method, "GET");
    assert_eq!(requests[1].path, "/api/v1/users/7/");
}

#[test]
fn test_binary_capable_create_encodes_multipart() {
    let server = StubServer::start(vec![CannedResponse::json(
        201,
        json!({"success": true, "data": product_json(1, "Widget")}),
    )]);
    let shop = shop(server.url());

    let values = FormValues::new()
        .with("name", "Widget")
        .with("description", "")
        .with("price", 19.99)
        .with("mainImage", FileAttachment::new("w.png", "image/png", vec![1, 2, 3]))
        .with(
            "secondaryImages",
            shopfront::FieldValue::Files(vec![
                FileAttachment::new("a.png", "image/png", vec![4]),
                FileAttachment::new("b.png", "image/png", vec![5]),
            ]),
        );
    shop.products().create(values).unwrap();

    let requests = server.finish();
    let content_type = requests[0].header("Content-Type").unwrap().to_string();
    assert!(content_type.starts_with("multipart/form-data; boundary="));
    let body = requests[0].body_text();
    assert!(body.contains("name=\"name\""));
    assert!(body.contains("name=\"mainImage\"; filename=\"w.png\""));
    // Array-valued file fields repeat the key.
    assert_eq!(body.matches("name=\"secondaryImages\"").count(), 2);
    // Empty values never reach the wire.
    assert!(!body.contains("name=\"description\""));
}

#[test]
fn test_delete_204_surfaces_as_success() {
    let server = StubServer::start(vec![CannedResponse::no_content()]);
    let shop = shop(server.url());

    let envelope = shop.users().delete(3).unwrap();
    assert!(envelope.success);
    assert!(envelope.data.is_none());
}

#[test]
fn test_create_action_invalidates_views_on_success() {
    let server = StubServer::start(vec![CannedResponse::json(
        201,
        json!({"success": true, "data": product_json(2, "Gadget")}),
    )]);
    let shop = shop(server.url());
    assert_eq!(shop.views().generation("/products"), 0);

    let submission = FormValues::new()
        .with("name", "Gadget")
        .with("description", "a gadget")
        .with("price", "24.50")
        .with("category", "Toys")
        .with("stockQuantity", "3")
        .with("mainImage", FileAttachment::new("g.png", "image/png", vec![9]));
    let state = shop.products().create_action(submission);

    assert!(state.success, "errors: {:?}", state.errors);
    assert_eq!(shop.views().generation("/products"), 1);
    assert_eq!(shop.views().generation("/admin/products"), 1);
}

#[test]
fn test_invalid_submission_never_reaches_the_network() {
    // A success is scripted; if a request leaked through, the action would
    // succeed and the request log would show it.
    let server = StubServer::start(vec![CannedResponse::json(
        201,
        json!({"success": true, "data": product_json(3, "Leak")}),
    )]);
    let shop = shop(server.url());

    let submission = FormValues::new().with("name", "Gadget");
    let state = shop.products().create_action(submission);
    assert!(!state.success);
    assert!(state.errors.contains_key("price"));
    assert_eq!(shop.views().generation("/products"), 0);

    let missing_id = FormValues::new().with("name", "Gadget");
    let state = shop.products().update_action(missing_id);
    assert_eq!(state.errors_for("id"), ["ID is required"]);
    assert!(server.requests().is_empty());
}

#[test]
fn test_file_backed_session_survives_a_new_handle() {
    let login_body = json!({
        "success": true,
        "data": {"token": "tok-file", "user": {"id": 1, "name": "Ada", "email": "a@b.co", "roles": "ROLE_USER"}}
    });
    let me_body = json!({
        "success": true,
        "data": {"id": 1, "name": "Ada", "email": "a@b.co", "roles": "ROLE_USER"}
    });
    let server = StubServer::start(vec![
        CannedResponse::json(200, login_body),
        CannedResponse::json(200, me_body),
    ]);
    let dir = tempfile::tempdir().unwrap();
    let session_path = dir.path().join("session.json");
    let config = Config::new(server.url(), "http://localhost:8000/storage/");

    let shop = Shopfront::with_session(
        config.clone(),
        Arc::new(FileCredentialStore::new(&session_path)),
        DeviceContext::default(),
    );
    shop.auth()
        .login(shopfront_types::LoginInput {
            email: "a@b.co".to_string(),
            password: "secret99".to_string(),
        })
        .unwrap();
    assert!(session_path.exists());

    // A fresh handle over the same session file is already authorized.
    let revived = Shopfront::with_session(
        config,
        Arc::new(FileCredentialStore::new(&session_path)),
        DeviceContext::default(),
    );
    assert!(revived.auth().me().is_some());

    let requests = server.finish();
    assert_eq!(requests[1].header("Authorization"), Some("Bearer tok-file"));
}

#[test]
fn test_login_through_facade_authorizes_later_calls() {
    let login_body = json!({
        "success": true,
        "data": {"token": "tok-777", "user": {"id": 1, "name": "Ada", "email": "a@b.co", "roles": "ROLE_ADMIN"}}
    });
    let me_body = json!({
        "success": true,
        "data": {"id": 1, "name": "Ada", "email": "a@b.co", "roles": "ROLE_ADMIN"}
    });
    let server = StubServer::start(vec![
        CannedResponse::json(200, login_body),
        CannedResponse::json(200, me_body),
    ]);
    let shop = shop(server.url());

    let envelope = shop
        .auth()
        .login(shopfront_types::LoginInput {
            email: "a@b.co".to_string(),
            password: "secret99".to_string(),
        })
        .unwrap();
    assert_eq!(envelope.data.unwrap().token, "tok-777");

    let me = shop.auth().me().unwrap();
    assert_eq!(me.name, "Ada");

    let requests = server.finish();
    assert_eq!(requests[0].path, "/api/v1/auth/login/");
    assert_eq!(requests[1].header("Authorization"), Some("Bearer tok-777"));

    shop.auth().logout();
    assert!(shop.transport().credentials().get().is_none());
}
