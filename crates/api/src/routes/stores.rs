//! Store endpoints: public lookup and merchant management.

use axum::extract::State;
use serde::Deserialize;
use tracing::instrument;

use shelfmerch_core::StoreSlug;

use crate::db::StoreRepository;
use crate::db::stores::CreateStore;
use crate::error::{AppError, Result};
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::RequireMerchant;
use crate::models::{Merchant, PublicStore, Store};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Longest accepted store name, in characters.
pub const MAX_STORE_NAME_CHARS: usize = 120;

/// Body of `POST /api/stores`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `PATCH /api/stores/{slug}`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStoreRequest {
    pub name: Option<String>,
    /// An empty string clears the description.
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Store name is required".to_string()));
    }
    if name.chars().count() > MAX_STORE_NAME_CHARS {
        return Err(AppError::BadRequest(format!(
            "Store name must be at most {MAX_STORE_NAME_CHARS} characters"
        )));
    }
    Ok(name.to_owned())
}

fn clean_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_owned())
        .filter(|d| !d.is_empty())
}

impl UpdateStoreRequest {
    /// Apply the changes to `store`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if the new name is invalid.
    pub fn apply(self, store: &mut Store) -> Result<()> {
        if let Some(name) = self.name {
            store.name = validate_name(&name)?;
        }
        if self.description.is_some() {
            store.description = clean_description(self.description);
        }
        if let Some(is_active) = self.is_active {
            store.is_active = is_active;
        }
        Ok(())
    }
}

/// Load one of the merchant's stores by slug; 404 when it is not theirs.
pub(crate) async fn merchant_store(state: &AppState, merchant: &Merchant, slug: &str) -> Result<Store> {
    let slug = StoreSlug::parse(slug).map_err(|_| AppError::NotFound("Store"))?;
    StoreRepository::new(state.pool())
        .get_for_merchant(merchant.id, &slug)
        .await?
        .ok_or(AppError::NotFound("Store"))
}

/// `GET /api/public/stores/{subdomain}`
pub async fn public_show(
    State(state): State<AppState>,
    ApiPath(subdomain): ApiPath<String>,
) -> Result<ApiResponse<PublicStore>> {
    let slug = StoreSlug::parse(&subdomain).map_err(|_| AppError::NotFound("Store"))?;
    let store = state
        .public_store(&slug)
        .await?
        .ok_or(AppError::NotFound("Store"))?;
    Ok(ApiResponse::ok(store))
}

/// `GET /api/stores`
pub async fn index(
    State(state): State<AppState>,
    RequireMerchant(merchant): RequireMerchant,
) -> Result<ApiResponse<Vec<Store>>> {
    let stores = StoreRepository::new(state.pool())
        .list_for_merchant(merchant.id)
        .await?;
    Ok(ApiResponse::ok(stores))
}

/// `POST /api/stores`
#[instrument(skip_all, fields(merchant_id = %merchant.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireMerchant(merchant): RequireMerchant,
    ApiJson(request): ApiJson<CreateStoreRequest>,
) -> Result<ApiResponse<Store>> {
    let name = validate_name(&request.name)?;
    let slug = StoreSlug::parse(&request.slug)
        .map_err(|e| AppError::BadRequest(format!("Invalid store slug: {e}")))?;

    let store = StoreRepository::new(state.pool())
        .create(&CreateStore {
            merchant_id: merchant.id,
            name,
            slug,
            description: clean_description(request.description),
        })
        .await?;

    tracing::info!(store_id = %store.id, slug = %store.slug, "Store created");
    Ok(ApiResponse::created(store))
}

/// `GET /api/stores/{slug}`
pub async fn show(
    State(state): State<AppState>,
    RequireMerchant(merchant): RequireMerchant,
    ApiPath(slug): ApiPath<String>,
) -> Result<ApiResponse<Store>> {
    let store = merchant_store(&state, &merchant, &slug).await?;
    Ok(ApiResponse::ok(store))
}

/// `PATCH /api/stores/{slug}`
#[instrument(skip_all, fields(merchant_id = %merchant.id, slug = %slug))]
pub async fn update(
    State(state): State<AppState>,
    RequireMerchant(merchant): RequireMerchant,
    ApiPath(slug): ApiPath<String>,
    ApiJson(request): ApiJson<UpdateStoreRequest>,
) -> Result<ApiResponse<Store>> {
    let mut store = merchant_store(&state, &merchant, &slug).await?;
    request.apply(&mut store)?;

    let store = StoreRepository::new(state.pool()).update(&store).await?;
    state.invalidate_public_store(&store.slug).await;

    Ok(ApiResponse::ok(store))
}
