//! Backend response envelopes.
//!
//! Every backend endpoint wraps its payload in a common envelope carrying a
//! success flag, an optional message, optional field errors, and (for list
//! endpoints) pagination metadata under `meta.pagination`.

use serde::{Deserialize, Serialize};

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

impl PaginationMeta {
    /// Build metadata for a page, deriving `total_pages` as `ceil(total / limit)`.
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(limit as u64)
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }

    /// Metadata for an empty collection (zero items, zero pages).
    pub fn empty(page: u32, limit: u32) -> Self {
        Self::new(page, limit, 0)
    }
}

/// Envelope metadata block. Only pagination is defined today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

/// Generic single-entity response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

impl<T> ApiEnvelope<T> {
    /// Envelope for a 204 no-content success (delete with no body).
    pub fn no_content() -> Self {
        Self {
            success: true,
            data: None,
            message: None,
            errors: None,
            meta: None,
        }
    }
}

/// Paginated list response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub meta: ResponseMeta,
}

impl<T> PaginatedResponse<T> {
    /// An empty page. Used when a read path degrades instead of raising.
    pub fn empty(page: u32, limit: u32) -> Self {
        Self {
            success: false,
            data: Vec::new(),
            message: None,
            meta: ResponseMeta {
                pagination: Some(PaginationMeta::empty(page, limit)),
            },
        }
    }

    /// The pagination block, or zeroed metadata when the backend omitted it.
    pub fn pagination(&self) -> PaginationMeta {
        self.meta
            .pagination
            .clone()
            .unwrap_or_else(|| PaginationMeta::empty(1, 0))
    }
}
