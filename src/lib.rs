//! Shopfront: a storefront data-access layer.
//!
//! The crate ties together the workspace members behind one handle:
//!
//! - [`shopfront_transport`]: HTTP transport with session handling and
//!   device context headers
//! - [`shopfront_resource`]: the generic typed CRUD client and the mutation
//!   action pipeline
//! - [`shopfront_schema`]: declarative submission validation
//! - [`shopfront_forms`]: the field rendering engine
//! - [`api`]: per-resource APIs (products, orders, users, cart, reviews,
//!   auth) with their schemas and form field sets
//!
//! # Example
//!
//! ```ignore
//! use shopfront::{Config, Shopfront};
//!
//! let shop = Shopfront::new(Config::from_env());
//! let page = shop.products().list(1, 10, "");
//! let product = shop.products().get(1);
//! let url = shop.image_url(product.and_then(|p| p.image_url).as_deref());
//! ```

pub mod api;
pub mod config;
pub mod images;

pub use api::{AuthApi, CartApi, OrdersApi, ProductsApi, ReviewsApi, UsersApi};
pub use config::Config;

// Re-export the workspace surface callers need most.
pub use shopfront_forms::{FieldConfig, FormModel, RenderedField};
pub use shopfront_resource::{ActionOptions, ApiResource, UpdateMethod, ViewCache};
pub use shopfront_schema::Schema;
pub use shopfront_transport::{
    CredentialStore, DeviceContext, FileCredentialStore, HttpTransport, MemoryCredentialStore,
};
pub use shopfront_types::{
    ActionState, ApiEnvelope, ApiError, FieldErrors, FieldValue, FileAttachment, FormValues,
    PaginatedResponse,
};

use std::sync::Arc;

/// One storefront backend, fully wired: shared transport, session store,
/// and view cache. Clone-cheap via the inner `Arc`s.
pub struct Shopfront {
    config: Config,
    transport: Arc<HttpTransport>,
    views: Arc<ViewCache>,
}

impl Shopfront {
    /// Wire up with an in-memory session store and default device context.
    pub fn new(config: Config) -> Self {
        Self::with_session(
            config,
            Arc::new(MemoryCredentialStore::new()),
            DeviceContext::default(),
        )
    }

    /// Wire up with a caller-chosen session store and device context (e.g.
    /// a [`FileCredentialStore`] and headers from an incoming request).
    pub fn with_session(
        config: Config,
        credentials: Arc<dyn CredentialStore>,
        device: DeviceContext,
    ) -> Self {
        let transport = Arc::new(HttpTransport::new(
            config.api_url.clone(),
            credentials,
            device,
        ));
        Self {
            config,
            transport,
            views: Arc::new(ViewCache::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &Arc<HttpTransport> {
        &self.transport
    }

    /// The view cache mutations invalidate into.
    pub fn views(&self) -> &ViewCache {
        &self.views
    }

    pub fn products(&self) -> ProductsApi {
        ProductsApi::new(self.transport.clone(), self.views.clone())
    }

    pub fn orders(&self) -> OrdersApi {
        OrdersApi::new(self.transport.clone(), self.views.clone())
    }

    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.transport.clone(), self.views.clone())
    }

    pub fn cart(&self) -> CartApi {
        CartApi::new(self.transport.clone())
    }

    pub fn reviews(&self) -> ReviewsApi {
        ReviewsApi::new(self.transport.clone())
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.transport.clone())
    }

    /// Resolve a stored image path against the configured image base.
    pub fn image_url(&self, path: Option<&str>) -> String {
        images::image_url(&self.config.image_url, path)
    }
}
