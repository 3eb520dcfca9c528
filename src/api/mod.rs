//! Storefront resource APIs, one module per backend resource family.

pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod users;

pub use auth::AuthApi;
pub use cart::CartApi;
pub use orders::OrdersApi;
pub use products::ProductsApi;
pub use reviews::ReviewsApi;
pub use users::UsersApi;
