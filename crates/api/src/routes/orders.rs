//! Store order endpoints.

use axum::extract::State;

use shelfmerch_core::StoreOrderId;

use crate::db::StoreOrderRepository;
use crate::error::{AppError, Result};
use crate::extract::{ApiPath, ApiQuery};
use crate::middleware::RequireMerchant;
use crate::models::StoreOrder;
use crate::response::ApiResponse;
use crate::routes::PageQuery;
use crate::routes::stores::merchant_store;
use crate::state::AppState;

/// `GET /api/stores/{slug}/orders`
pub async fn index(
    State(state): State<AppState>,
    RequireMerchant(merchant): RequireMerchant,
    ApiPath(slug): ApiPath<String>,
    ApiQuery(page): ApiQuery<PageQuery>,
) -> Result<ApiResponse<Vec<StoreOrder>>> {
    let store = merchant_store(&state, &merchant, &slug).await?;
    let orders = StoreOrderRepository::new(state.pool())
        .list_for_store(store.id, page.into())
        .await?;
    Ok(ApiResponse::ok(orders))
}

/// `GET /api/stores/{slug}/orders/{id}`
pub async fn show(
    State(state): State<AppState>,
    RequireMerchant(merchant): RequireMerchant,
    ApiPath((slug, id)): ApiPath<(String, i32)>,
) -> Result<ApiResponse<StoreOrder>> {
    let store = merchant_store(&state, &merchant, &slug).await?;
    let order = StoreOrderRepository::new(state.pool())
        .get_for_store(store.id, StoreOrderId::new(id))
        .await?
        .ok_or(AppError::NotFound("Order"))?;
    Ok(ApiResponse::ok(order))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};

    use crate::routes::test_support::send;

    #[tokio::test]
    async fn test_requires_token() {
        for uri in ["/api/stores/acme-tees/orders", "/api/stores/acme-tees/orders/1"] {
            let (status, _) = send(Request::get(uri).body(Body::empty()).unwrap()).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        }
    }
}
