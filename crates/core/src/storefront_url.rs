//! Public URL of a merchant storefront.
//!
//! In development every store is served under one host as
//! `http://localhost:8080/store/{slug}`. In production each store gets its
//! own subdomain: `https://{slug}.{base host}`.

use url::Url;

use crate::types::StoreSlug;

/// Base URL used when none is configured.
pub const DEFAULT_STORE_BASE_URL: &str = "http://localhost:8080";

/// Builds storefront URLs from the configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontUrls {
    base: String,
    host: String,
}

impl StorefrontUrls {
    /// Parse the base URL.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if `base` is not an absolute URL with a host.
    pub fn new(base: &str) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(base)?;
        let host = parsed
            .host_str()
            .ok_or(url::ParseError::EmptyHost)?
            .to_owned();

        Ok(Self {
            base: base.trim_end_matches('/').to_owned(),
            host,
        })
    }

    /// Whether stores are served path-based from localhost.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.host == "localhost"
    }

    /// Public URL for a store.
    #[must_use]
    pub fn store_url(&self, slug: &StoreSlug) -> String {
        if self.is_local() {
            format!("{}/store/{slug}", self.base)
        } else {
            format!("https://{slug}.{}", self.host)
        }
    }
}

impl Default for StorefrontUrls {
    fn default() -> Self {
        Self {
            base: DEFAULT_STORE_BASE_URL.to_owned(),
            host: "localhost".to_owned(),
        }
    }
}
