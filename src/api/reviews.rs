//! Product reviews. Reviews hang off the products resource
//! (`/api/v1/products/{id}/reviews`) and paginate with their own shape.

use serde::Deserialize;
use shopfront_resource::ApiResource;
use shopfront_transport::HttpTransport;
use shopfront_types::{ApiEnvelope, ApiError, CreateReviewInput, Product, Review};
use std::sync::Arc;

/// One page of reviews as the backend shapes it.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPage {
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub total_reviews: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub current_page: u32,
}

pub struct ReviewsApi {
    resource: ApiResource<Product>,
}

impl ReviewsApi {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self {
            resource: ApiResource::new(transport, "api/v1/products", false),
        }
    }

    /// One page of reviews for a product. Degrades to an empty page.
    pub fn for_product(&self, product_id: i64, page: u32, limit: u32) -> ReviewPage {
        self.resource
            .get_sub(&format!("{product_id}/reviews?page={page}&limit={limit}"))
            .unwrap_or_default()
    }

    /// Post a review. Requires an authenticated session.
    pub fn create(
        &self,
        product_id: i64,
        input: CreateReviewInput,
    ) -> Result<ApiEnvelope<Review>, ApiError> {
        self.resource
            .post_sub(&format!("{product_id}/reviews"), input)
    }
}
