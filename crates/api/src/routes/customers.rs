//! Store customer endpoints.

use axum::extract::State;

use crate::db::StoreCustomerRepository;
use crate::error::Result;
use crate::extract::{ApiPath, ApiQuery};
use crate::middleware::RequireMerchant;
use crate::models::StoreCustomer;
use crate::response::ApiResponse;
use crate::routes::PageQuery;
use crate::routes::stores::merchant_store;
use crate::state::AppState;

/// `GET /api/stores/{slug}/customers`
pub async fn index(
    State(state): State<AppState>,
    RequireMerchant(merchant): RequireMerchant,
    ApiPath(slug): ApiPath<String>,
    ApiQuery(page): ApiQuery<PageQuery>,
) -> Result<ApiResponse<Vec<StoreCustomer>>> {
    let store = merchant_store(&state, &merchant, &slug).await?;
    let customers = StoreCustomerRepository::new(state.pool())
        .list_for_store(store.id, page.into())
        .await?;
    Ok(ApiResponse::ok(customers))
}
