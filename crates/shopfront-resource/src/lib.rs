//! Generic resource access and mutation pipeline.
//!
//! This crate provides:
//! - [`resource`]: [`ApiResource`], the typed CRUD client over the transport
//! - [`action`]: the mutation action pipeline turning raw submissions into
//!   validated, encoded calls with a uniform outcome state
//! - [`views`]: named view invalidation so cached reads reflect mutations
//!
//! The read/write error policy is deliberate and part of the contract:
//! read operations (`list`, `get`, and their sub-resource variants) degrade
//! to empty or `None` results so display pages never crash on transient
//! failures, while write operations always surface typed errors.
//!
//! # Example
//!
//! ```ignore
//! use shopfront_resource::{ApiResource, UpdateMethod};
//!
//! let products: ApiResource<Product, CreateProductInput, UpdateProductInput> =
//!     ApiResource::new(transport, "api/v1/products", true);
//! let page = products.list_paginated(1, 10, "", false, true);
//! let created = products.create(input)?;
//! ```

pub mod action;
pub mod resource;
pub mod views;

pub use action::ActionOptions;
pub use resource::{ApiResource, UpdateMethod};
pub use views::ViewCache;
