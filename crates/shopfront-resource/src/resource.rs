//! Typed CRUD client.
//!
//! An [`ApiResource`] is parameterized by the entity it returns and by the
//! create/update input shapes it accepts. The base path and the
//! binary-capability flag are fixed at construction; the flag decides
//! whether mutation payloads are JSON or multipart encoded.
//!
//! Error policy: reads degrade (empty list, `None`), writes raise. See the
//! crate docs.

use serde::de::DeserializeOwned;
use serde_json::Value;
use shopfront_transport::client::{HttpResponse, HttpTransport, Method, RequestOptions};
use shopfront_types::envelope::{ApiEnvelope, PaginatedResponse};
use shopfront_types::error::ApiError;
use shopfront_types::form::FormValues;
use shopfront_types::payload::{IntoPayload, Payload};
use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::warn;

/// HTTP verb used for updates; some backends route updates through POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMethod {
    #[default]
    Put,
    Post,
}

impl From<UpdateMethod> for Method {
    fn from(method: UpdateMethod) -> Method {
        match method {
            UpdateMethod::Put => Method::Put,
            UpdateMethod::Post => Method::Post,
        }
    }
}

/// Generic CRUD facade over one backend resource family.
pub struct ApiResource<T, C = FormValues, U = FormValues> {
    base_path: String,
    have_files: bool,
    transport: Arc<HttpTransport>,
    _marker: PhantomData<fn() -> (T, C, U)>,
}

impl<T, C, U> ApiResource<T, C, U>
where
    T: DeserializeOwned,
{
    /// Create a client for `resource_path` (e.g. `api/v1/products`).
    /// `have_files` marks the resource as binary-capable: its mutation
    /// payloads are sent as multipart/form-data.
    pub fn new(transport: Arc<HttpTransport>, resource_path: &str, have_files: bool) -> Self {
        let base_path = format!("/{}/", resource_path.trim_matches('/'));
        Self {
            base_path,
            have_files,
            transport,
            _marker: PhantomData,
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn have_files(&self) -> bool {
        self.have_files
    }

    pub fn transport(&self) -> &Arc<HttpTransport> {
        &self.transport
    }

    // -------------------------------------------------------------------------
    // Read operations: degrade to empty defaults, never raise
    // -------------------------------------------------------------------------

    /// All entities, unpaginated. Failures degrade to an empty list.
    pub fn list(&self) -> Vec<T> {
        self.list_sub("")
    }

    /// One page of entities with pagination metadata. Failures degrade to
    /// an empty page with zero totals.
    pub fn list_paginated(
        &self,
        page: u32,
        limit: u32,
        search: &str,
        admin: bool,
        paginated: bool,
    ) -> PaginatedResponse<T> {
        self.list_sub_paginated("", page, limit, search, admin, paginated)
    }

    /// One entity by id, or `None` when missing or unreachable.
    pub fn get(&self, id: impl Display) -> Option<T> {
        self.get_sub(&id.to_string())
    }

    /// GET a named child path, unwrapping the envelope. `None` on failure.
    pub fn get_sub<R: DeserializeOwned>(&self, sub: &str) -> Option<R> {
        let path = self.sub_path(sub);
        let result = self
            .transport
            .request(&path, RequestOptions::get())
            .and_then(parse_envelope::<R>);
        match result {
            Ok(envelope) => envelope.data,
            Err(error) => {
                warn!(%path, error = %error, "read failed, returning none");
                None
            }
        }
    }

    /// GET a named child path as an unpaginated list. Empty on failure.
    pub fn list_sub<R: DeserializeOwned>(&self, sub: &str) -> Vec<R> {
        let path = with_query(&self.sub_path(sub), "paginated=false");
        let result = self
            .transport
            .request(&path, RequestOptions::get())
            .and_then(parse_paginated::<R>);
        match result {
            Ok(response) => response.data,
            Err(error) => {
                warn!(%path, error = %error, "list failed, returning empty");
                Vec::new()
            }
        }
    }

    /// GET a named child path as one page. Empty page on failure.
    pub fn list_sub_paginated<R: DeserializeOwned>(
        &self,
        sub: &str,
        page: u32,
        limit: u32,
        search: &str,
        admin: bool,
        paginated: bool,
    ) -> PaginatedResponse<R> {
        let query = format!(
            "page={page}&limit={limit}&search={}&admin={admin}&paginated={paginated}",
            urlencoding::encode(search)
        );
        let path = with_query(&self.sub_path(sub), &query);
        let result = self
            .transport
            .request(&path, RequestOptions::get())
            .and_then(parse_paginated::<R>);
        match result {
            Ok(response) => response,
            Err(error) => {
                warn!(%path, error = %error, "paginated list failed, returning empty page");
                PaginatedResponse::empty(page, limit)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Write operations: always surface typed errors
    // -------------------------------------------------------------------------

    /// Create an entity.
    pub fn create(&self, data: C) -> Result<ApiEnvelope<T>, ApiError>
    where
        C: IntoPayload,
    {
        let path = self.base_path.clone();
        self.send(&path, Method::Post, data.into_payload()?)
    }

    /// Update an entity by id.
    pub fn update(
        &self,
        id: impl Display,
        data: U,
        method: UpdateMethod,
    ) -> Result<ApiEnvelope<T>, ApiError>
    where
        U: IntoPayload,
    {
        let path = self.sub_path(&id.to_string());
        self.send(&path, method.into(), data.into_payload()?)
    }

    /// Delete an entity by id. A 204 answer is a success with no body.
    pub fn delete(&self, id: impl Display) -> Result<ApiEnvelope<Value>, ApiError> {
        let path = self.sub_path(&id.to_string());
        let response = self.transport.request(&path, RequestOptions::delete())?;
        parse_envelope(response)
    }

    /// POST to a named child path (actions not expressible as plain CRUD).
    pub fn post_sub<R: DeserializeOwned, B: IntoPayload>(
        &self,
        sub: &str,
        body: B,
    ) -> Result<ApiEnvelope<R>, ApiError> {
        let path = self.sub_path(sub);
        self.send_as(&path, Method::Post, body.into_payload()?)
    }

    /// DELETE a named child path.
    pub fn delete_sub<R: DeserializeOwned>(&self, sub: &str) -> Result<ApiEnvelope<R>, ApiError> {
        let path = self.sub_path(sub);
        let response = self.transport.request(&path, RequestOptions::delete())?;
        parse_envelope(response)
    }

    /// Download a binary child resource: raw bytes plus suggested filename.
    pub fn download_sub(&self, sub: &str) -> Result<(Vec<u8>, String), ApiError> {
        self.transport.download(&self.sub_path(sub))
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn send(&self, path: &str, method: Method, payload: Payload) -> Result<ApiEnvelope<T>, ApiError> {
        self.send_as(path, method, payload)
    }

    /// Used by the action pipeline, which works on untyped envelopes.
    pub(crate) fn send_raw(
        &self,
        path: &str,
        method: Method,
        payload: Payload,
    ) -> Result<ApiEnvelope<Value>, ApiError> {
        self.send_as(path, method, payload)
    }

    pub(crate) fn item_path(&self, id: impl Display) -> String {
        self.sub_path(&id.to_string())
    }

    fn send_as<R: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        payload: Payload,
    ) -> Result<ApiEnvelope<R>, ApiError> {
        let options = if self.have_files {
            RequestOptions::multipart(method, payload.into_form_values())
        } else {
            RequestOptions::json(method, payload.into_json_map()?)
        };
        let response = self.transport.request(path, options)?;
        parse_envelope(response)
    }

    /// Child path under the base, normalized to a trailing slash. Query
    /// strings survive normalization (`items?x=1` -> `.../items/?x=1`).
    pub(crate) fn sub_path(&self, sub: &str) -> String {
        let trimmed = sub.trim_matches('/');
        if trimmed.is_empty() {
            return self.base_path.clone();
        }
        match trimmed.split_once('?') {
            Some((path, query)) => format!("{}{}/?{}", self.base_path, path.trim_end_matches('/'), query),
            None => format!("{}{}/", self.base_path, trimmed),
        }
    }
}

fn parse_envelope<R: DeserializeOwned>(response: HttpResponse) -> Result<ApiEnvelope<R>, ApiError> {
    match response {
        HttpResponse::NoContent => Ok(ApiEnvelope::no_content()),
        HttpResponse::Json(value) => {
            serde_json::from_value(value).map_err(|e| ApiError::Unknown {
                status: 0,
                message: format!("malformed response envelope: {e}"),
            })
        }
        other => Err(ApiError::BadRequest(format!(
            "expected a JSON envelope, got {other:?}"
        ))),
    }
}

fn parse_paginated<R: DeserializeOwned>(
    response: HttpResponse,
) -> Result<PaginatedResponse<R>, ApiError> {
    let value = response.into_json()?;
    serde_json::from_value(value).map_err(|e| ApiError::Unknown {
        status: 0,
        message: format!("malformed paginated response: {e}"),
    })
}

fn with_query(path: &str, query: &str) -> String {
    if path.contains('?') {
        format!("{path}&{query}")
    } else {
        format!("{path}?{query}")
    }
}
