//! Shared types for the shopfront workspace.
//!
//! This crate provides foundational types used across multiple crates in the workspace,
//! breaking circular dependency chains.
//!
//! - [`envelope`]: backend response envelope and pagination metadata
//! - [`error`]: the typed error taxonomy mapped from HTTP status codes
//! - [`form`]: ordered form values and file attachments for submissions
//! - [`payload`]: request payload abstraction (JSON body or multipart form)
//! - [`state`]: the outcome state produced by one mutation attempt
//! - [`entities`]: storefront entities and input DTOs

pub mod entities;
pub mod envelope;
pub mod error;
pub mod form;
pub mod payload;
pub mod state;

// Re-export commonly used types at crate root
pub use entities::{
    AddToCartInput, Address, AuthResponse, Cart, CartItem, CreateOrderInput, CreateReviewInput,
    CreateUserInput, LoginInput, Order, OrderItem, OrderStatus, Product, RegisterInput, Review,
    UpdateCartItemInput, UpdateOrderStatusInput, UpdateUserInput, User,
};
pub use envelope::{ApiEnvelope, PaginatedResponse, PaginationMeta, ResponseMeta};
pub use error::{ApiError, FieldErrors};
pub use form::{FieldValue, FileAttachment, FormValues};
pub use payload::{IntoPayload, Payload};
pub use state::ActionState;
