//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};
use sqlx::PgPool;

use shelfmerch_core::StoreSlug;

use crate::config::ApiConfig;
use crate::db::{RepositoryError, StoreRepository};
use crate::models::PublicStore;

/// Public store lookups kept at most this long.
const STORE_CACHE_TTL: Duration = Duration::from_secs(60);
const STORE_CACHE_CAPACITY: u64 = 1_000;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: PgPool,
    admin_token_digest: [u8; 32],
    public_stores: Cache<StoreSlug, PublicStore>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ApiConfig, pool: PgPool) -> Self {
        let admin_token_digest = Sha256::digest(config.admin_token.expose_secret().as_bytes()).into();
        let public_stores = Cache::builder()
            .max_capacity(STORE_CACHE_CAPACITY)
            .time_to_live(STORE_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                admin_token_digest,
                public_stores,
            }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Whether `token` is the platform admin token.
    ///
    /// Compares SHA-256 digests so the comparison time does not depend on
    /// how much of the token matched.
    #[must_use]
    pub fn is_admin_token(&self, token: &str) -> bool {
        let digest: [u8; 32] = Sha256::digest(token.as_bytes()).into();
        digest == self.inner.admin_token_digest
    }

    /// Active store by slug as public visitors see it, cached for 60 s.
    ///
    /// Misses are not cached, so a newly created store shows up immediately.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the database lookup fails.
    pub async fn public_store(&self, slug: &StoreSlug) -> Result<Option<PublicStore>, RepositoryError> {
        if let Some(store) = self.inner.public_stores.get(slug).await {
            return Ok(Some(store));
        }

        let Some(store) = StoreRepository::new(self.pool()).get_active_by_slug(slug).await? else {
            return Ok(None);
        };

        let public = PublicStore::from_store(&store, &self.config().storefront_urls);
        self.inner
            .public_stores
            .insert(slug.clone(), public.clone())
            .await;
        Ok(Some(public))
    }

    /// Drop a store from the public lookup cache after it changed.
    pub async fn invalidate_public_store(&self, slug: &StoreSlug) {
        self.inner.public_stores.invalidate(slug).await;
    }
}
