//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                              - Liveness
//! GET    /health/ready                        - Readiness (database)
//!
//! # Public
//! GET    /api/public/stores/{subdomain}       - Active store by slug (cached)
//! POST   /api/store-checkout/{subdomain}      - Place an order (rate limited)
//! GET    /api/products                        - Catalogue list (?category=&limit=&offset=)
//! GET    /api/products/{id}                   - Catalogue product
//! GET    /api/catalog/options                 - Categories, sizes, colours, tax rules
//!
//! # Merchant (Authorization: Bearer <merchant token>)
//! GET    /api/stores                          - Own stores
//! POST   /api/stores                          - Create store
//! GET    /api/stores/{slug}                   - Own store
//! PATCH  /api/stores/{slug}                   - Update store
//! GET    /api/stores/{slug}/customers         - Store customers
//! GET    /api/stores/{slug}/orders            - Store orders
//! GET    /api/stores/{slug}/orders/{id}       - Store order
//!
//! # Admin (Authorization: Bearer <SHELFMERCH_ADMIN_TOKEN>)
//! POST   /api/admin/products                  - Create catalogue product
//! PUT    /api/admin/products/{id}             - Replace catalogue product
//! DELETE /api/admin/products/{id}             - Delete catalogue product
//! ```

pub mod checkout;
pub mod customers;
pub mod health;
pub mod orders;
pub mod products;
pub mod stores;

use axum::{
    Router,
    routing::{get, post, put},
};
use serde::Deserialize;

use crate::db::Page;
use crate::state::AppState;

/// `?limit=&offset=` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl From<PageQuery> for Page {
    fn from(query: PageQuery) -> Self {
        Self::new(query.limit, query.offset)
    }
}

/// Create the merchant store routes router.
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(stores::index).post(stores::create))
        .route("/{slug}", get(stores::show).patch(stores::update))
        .route("/{slug}/customers", get(customers::index))
        .route("/{slug}/orders", get(orders::index))
        .route("/{slug}/orders/{id}", get(orders::show))
}

/// Create the catalogue routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the admin catalogue routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(products::create))
        .route(
            "/products/{id}",
            put(products::replace).delete(products::delete),
        )
}

/// Create the checkout router.
///
/// Kept separate so the binary can wrap it in the checkout rate limiter.
pub fn checkout_routes() -> Router<AppState> {
    Router::new().route("/api/store-checkout/{subdomain}", post(checkout::place_order))
}

/// Create all routes except checkout.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/api/public/stores/{subdomain}", get(stores::public_show))
        .route("/api/catalog/options", get(products::options))
        .nest("/api/products", product_routes())
        .nest("/api/stores", store_routes())
        .nest("/api/admin", admin_routes())
}
