//! Runtime configuration.
//!
//! Values come from environment variables with local-development defaults,
//! read once at construction time.

use std::env;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_IMAGE_URL: &str = "http://localhost:8000/storage/";

/// Backend endpoints the storefront talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the backend API.
    pub api_url: String,
    /// Base URL stored image paths resolve against.
    pub image_url: String,
}

impl Config {
    /// Read `SHOPFRONT_API_URL` and `SHOPFRONT_IMAGE_URL`, falling back to
    /// the local-development defaults.
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("SHOPFRONT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            image_url: env::var("SHOPFRONT_IMAGE_URL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_URL.to_string()),
        }
    }

    pub fn new(api_url: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            image_url: image_url.into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_IMAGE_URL)
    }
}
