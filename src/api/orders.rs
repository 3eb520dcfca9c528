//! Order API: listing, status updates, invoice download.

use serde_json::Value;
use shopfront_resource::{ActionOptions, ApiResource, ViewCache};
use shopfront_transport::HttpTransport;
use shopfront_types::{
    ActionState, ApiEnvelope, ApiError, CreateOrderInput, FormValues, Order, OrderStatus,
    UpdateOrderStatusInput,
};
use std::sync::Arc;

pub const ORDER_VIEWS: [&str; 2] = ["/admin/orders", "/orders"];

pub struct OrdersApi {
    resource: ApiResource<Order, CreateOrderInput, UpdateOrderStatusInput>,
    views: Arc<ViewCache>,
}

impl OrdersApi {
    pub fn new(transport: Arc<HttpTransport>, views: Arc<ViewCache>) -> Self {
        Self {
            resource: ApiResource::new(transport, "api/v1/orders", false),
            views,
        }
    }

    pub fn all(&self) -> Vec<Order> {
        self.resource.list()
    }

    pub fn get(&self, id: i64) -> Option<Order> {
        self.resource.get(id)
    }

    pub fn by_number(&self, order_number: &str) -> Option<Order> {
        self.resource.get_sub(&format!("number/{order_number}"))
    }

    /// Every order belonging to one customer. Empty on failure.
    pub fn customer_orders(&self, customer_id: i64) -> Vec<Order> {
        self.resource
            .get_sub(&format!("customer/{customer_id}"))
            .unwrap_or_default()
    }

    /// Most recent orders of one customer, newest first as the backend
    /// returns them.
    pub fn recent(&self, customer_id: i64, limit: usize) -> Vec<Order> {
        let mut orders = self.customer_orders(customer_id);
        orders.truncate(limit);
        orders
    }

    pub fn by_status(&self, customer_id: i64, status: OrderStatus) -> Vec<Order> {
        self.customer_orders(customer_id)
            .into_iter()
            .filter(|order| order.status == status)
            .collect()
    }

    pub fn create(&self, input: CreateOrderInput) -> Result<ApiEnvelope<Order>, ApiError> {
        self.resource.create(input)
    }

    pub fn update_status(
        &self,
        id: i64,
        status: OrderStatus,
    ) -> Result<ApiEnvelope<Order>, ApiError> {
        self.resource
            .post_sub(&format!("{id}/status"), UpdateOrderStatusInput { status })
    }

    pub fn cancel(&self, id: i64) -> Result<ApiEnvelope<Value>, ApiError> {
        self.resource.delete(id)
    }

    /// The order's invoice as raw bytes plus a suggested filename.
    pub fn invoice(&self, id: i64) -> Result<(Vec<u8>, String), ApiError> {
        self.resource.download_sub(&format!("{id}/invoice"))
    }

    pub fn cancel_action(&self, submission: &FormValues) -> ActionState {
        let options = ActionOptions::invalidating(&self.views, &ORDER_VIEWS);
        self.resource.delete_action(submission, &options)
    }
}
