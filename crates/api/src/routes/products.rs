//! Catalogue endpoints.
//!
//! Reads are public; writes need the admin token.

use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use shelfmerch_core::ProductId;
use shelfmerch_core::catalog::{
    Category, MAX_MOCKUP_IMAGES, NewProduct, STANDARD_COLORS, STANDARD_SIZES, TaxRule, color_hex,
};

use crate::db::{Page, ProductRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::RequireAdmin;
use crate::models::Product;
use crate::response::ApiResponse;
use crate::state::AppState;

/// `GET /api/products` query.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    /// Category display name or slug.
    pub category: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Choices for the dashboard product form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogOptions {
    pub categories: Vec<CategoryOption>,
    pub sizes: &'static [&'static str],
    pub colors: Vec<ColorOption>,
    pub tax_rules: Vec<TaxRuleOption>,
    pub max_mockup_images: usize,
}

#[derive(Debug, Serialize)]
pub struct CategoryOption {
    pub name: &'static str,
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct ColorOption {
    pub name: &'static str,
    pub hex: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct TaxRuleOption {
    pub id: &'static str,
    pub label: &'static str,
    pub rate: u32,
}

impl CatalogOptions {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            categories: Category::ALL
                .into_iter()
                .map(|c| CategoryOption {
                    name: c.name(),
                    slug: c.slug(),
                })
                .collect(),
            sizes: STANDARD_SIZES,
            colors: STANDARD_COLORS
                .iter()
                .map(|&name| ColorOption {
                    name,
                    hex: color_hex(name),
                })
                .collect(),
            tax_rules: TaxRule::ALL
                .into_iter()
                .map(|rule| TaxRuleOption {
                    id: rule.id(),
                    label: rule.label(),
                    rate: rule.rate_percent(),
                })
                .collect(),
            max_mockup_images: MAX_MOCKUP_IMAGES,
        }
    }
}

/// `GET /api/catalog/options`
pub async fn options() -> ApiResponse<CatalogOptions> {
    ApiResponse::ok(CatalogOptions::standard())
}

/// `GET /api/products`
pub async fn index(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProductQuery>,
) -> Result<ApiResponse<Vec<Product>>> {
    let category = query
        .category
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .map(str::parse::<Category>)
        .transpose()?;

    let products = ProductRepository::new(state.pool())
        .list(category, Page::new(query.limit, query.offset))
        .await?;
    Ok(ApiResponse::ok(products))
}

/// `GET /api/products/{id}`
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<ApiResponse<Product>> {
    let product = ProductRepository::new(state.pool())
        .get(ProductId::new(id))
        .await?
        .ok_or(AppError::NotFound("Product"))?;
    Ok(ApiResponse::ok(product))
}

/// `POST /api/admin/products`
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ApiJson(product): ApiJson<NewProduct>,
) -> Result<ApiResponse<Product>> {
    let draft = product.validate()?;
    let product = ProductRepository::new(state.pool()).create(&draft).await?;

    tracing::info!(product_id = %product.id, name = %product.name, "Catalogue product created");
    Ok(ApiResponse::created(product))
}

/// `PUT /api/admin/products/{id}`
#[instrument(skip_all, fields(product_id = id))]
pub async fn replace(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ApiPath(id): ApiPath<i32>,
    ApiJson(product): ApiJson<NewProduct>,
) -> Result<ApiResponse<Product>> {
    let draft = product.validate()?;
    let product = ProductRepository::new(state.pool())
        .replace(ProductId::new(id), &draft)
        .await
        .map_err(not_found_as("Product"))?;
    Ok(ApiResponse::ok(product))
}

/// `DELETE /api/admin/products/{id}`
#[instrument(skip_all, fields(product_id = id))]
pub async fn delete(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ApiPath(id): ApiPath<i32>,
) -> Result<ApiResponse<Value>> {
    ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await
        .map_err(not_found_as("Product"))?;
    tracing::info!(product_id = id, "Catalogue product deleted");
    Ok(ApiResponse::ok(json!({ "id": id })))
}

fn not_found_as(what: &'static str) -> impl Fn(RepositoryError) -> AppError {
    move |err| match err {
        RepositoryError::NotFound => AppError::NotFound(what),
        other => other.into(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};

    use super::*;
    use crate::routes::test_support::{ADMIN_TOKEN, json_request, send, with_bearer};

    fn hoodie() -> serde_json::Value {
        json!({
            "name": "Zip Hoodie",
            "category": "Hoodies",
            "basePrice": "39.50",
            "sizes": ["M"],
            "colors": ["Black"],
            "mockupUrls": ["https://cdn.test/hoodie.png"]
        })
    }

    #[tokio::test]
    async fn test_options() {
        let (status, body) =
            send(Request::get("/api/catalog/options").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["categories"][0], json!({ "name": "T-Shirts", "slug": "t-shirts" }));
        assert_eq!(body["data"]["colors"][0], json!({ "name": "Black", "hex": "#000000" }));
        assert_eq!(body["data"]["taxRules"].as_array().unwrap().len(), 4);
        assert_eq!(body["data"]["maxMockupImages"], 10);
    }

    #[tokio::test]
    async fn test_unknown_category_is_400() {
        let (status, body) =
            send(Request::get("/api/products?category=socks").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Unknown category: socks");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_enveloped_400() {
        let (status, body) =
            send(Request::get("/api/products/abc").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().contains("Cannot parse"));
    }

    #[tokio::test]
    async fn test_bad_query_is_enveloped_400() {
        let (status, body) =
            send(Request::get("/api/products?limit=x").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().starts_with("Failed to deserialize query string"));
    }

    #[tokio::test]
    async fn test_create_rejects_unstorable_price() {
        let mut product = hoodie();
        product["basePrice"] = json!("99999999999.00");
        let request = with_bearer(
            json_request("POST", "/api/admin/products", &product),
            ADMIN_TOKEN,
        );
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Prices must be whole cents and at most 9999999999.99");
    }

    #[tokio::test]
    async fn test_create_requires_admin_token() {
        let (status, _) = send(json_request("POST", "/api/admin/products", &hoodie())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let request = with_bearer(
            json_request("POST", "/api/admin/products", &hoodie()),
            "wrong-token",
        );
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_validates_before_saving() {
        let mut product = hoodie();
        product["sizes"] = json!([]);
        let request = with_bearer(
            json_request("POST", "/api/admin/products", &product),
            ADMIN_TOKEN,
        );
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Please select at least one size");
    }

    #[tokio::test]
    async fn test_replace_validates_before_saving() {
        let mut product = hoodie();
        product["name"] = json!("   ");
        let request = with_bearer(
            json_request("PUT", "/api/admin/products/5", &product),
            ADMIN_TOKEN,
        );
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Please enter a product name");
    }

    #[tokio::test]
    async fn test_delete_requires_admin_token() {
        let request = Request::delete("/api/admin/products/5").body(Body::empty()).unwrap();
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
