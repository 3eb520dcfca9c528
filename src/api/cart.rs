//! Shopping cart API. The backend routes every cart mutation through named
//! sub-actions rather than plain CRUD.

use shopfront_resource::ApiResource;
use shopfront_transport::HttpTransport;
use shopfront_types::{
    AddToCartInput, ApiEnvelope, ApiError, Cart, UpdateCartItemInput,
};
use std::sync::Arc;

pub struct CartApi {
    resource: ApiResource<Cart>,
}

impl CartApi {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self {
            resource: ApiResource::new(transport, "api/v1/cart", false),
        }
    }

    /// The user's current cart, or `None` when empty or unreachable.
    pub fn current(&self, user_id: i64) -> Option<Cart> {
        self.resource.get_sub(&format!("current?userId={user_id}"))
    }

    pub fn add(&self, input: AddToCartInput) -> Result<ApiEnvelope<Cart>, ApiError> {
        self.resource.post_sub("add", input)
    }

    pub fn update_item(&self, input: UpdateCartItemInput) -> Result<ApiEnvelope<Cart>, ApiError> {
        self.resource.post_sub("update", input)
    }

    pub fn remove(&self, product_id: i64, user_id: i64) -> Result<ApiEnvelope<Cart>, ApiError> {
        self.resource
            .delete_sub(&format!("items/{product_id}?userId={user_id}"))
    }

    pub fn clear(&self, user_id: i64) -> Result<ApiEnvelope<Cart>, ApiError> {
        self.resource.delete_sub(&format!("clear?userId={user_id}"))
    }

    pub fn total(&self, user_id: i64) -> f64 {
        self.current(user_id).map(|cart| cart.total).unwrap_or(0.0)
    }

    pub fn item_count(&self, user_id: i64) -> u32 {
        self.current(user_id)
            .map(|cart| cart.item_count)
            .unwrap_or(0)
    }
}
