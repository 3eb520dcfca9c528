//! Shopfront Transport Layer
//!
//! Low-level HTTP access to the storefront backend.
//!
//! This crate provides:
//! - [`client`]: the single request entry point with header injection,
//!   response classification, and typed error mapping
//! - [`session`]: credential storage (bearer token + role, with expiry)
//! - [`device`]: request-scoped device context (client IP, user agent)
//! - [`multipart`]: multipart/form-data encoding for binary-capable payloads
//!
//! # Example
//!
//! ```ignore
//! use shopfront_transport::{DeviceContext, HttpTransport, MemoryCredentialStore};
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryCredentialStore::new());
//! let transport = HttpTransport::new("http://localhost:8000", store, DeviceContext::default());
//! let response = transport.request("/api/v1/products/", Default::default())?;
//! ```

pub mod client;
pub mod device;
pub mod multipart;
pub mod session;

// Re-export main types for convenience
pub use client::{HttpBody, HttpResponse, HttpTransport, Method, RequestOptions, ResponseKind};
pub use device::DeviceContext;
pub use session::{Credential, CredentialStore, FileCredentialStore, MemoryCredentialStore};
