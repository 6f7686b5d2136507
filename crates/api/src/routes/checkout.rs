//! Storefront checkout endpoint.

use axum::extract::State;

use shelfmerch_core::checkout::CheckoutRequest;

use crate::error::{Result, add_breadcrumb};
use crate::extract::{ApiJson, ApiPath};
use crate::models::StoreOrder;
use crate::response::ApiResponse;
use crate::services::checkout as checkout_service;
use crate::state::AppState;

/// `POST /api/store-checkout/{subdomain}`
///
/// Responds 201 with the created order.
pub async fn place_order(
    State(state): State<AppState>,
    ApiPath(subdomain): ApiPath<String>,
    ApiJson(request): ApiJson<CheckoutRequest>,
) -> Result<ApiResponse<StoreOrder>> {
    add_breadcrumb("checkout", "Checkout submitted", &[("store", &subdomain)]);

    let order = checkout_service::place_order(
        state.pool(),
        &state.config().pricing,
        &subdomain,
        request,
    )
    .await?;

    Ok(ApiResponse::created(order))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::json;

    use crate::routes::test_support::{json_request, send};

    const URI: &str = "/api/store-checkout/acme-tees";

    fn line() -> serde_json::Value {
        json!({ "product": { "id": 1, "name": "Tee", "price": 20 }, "quantity": 1 })
    }

    #[tokio::test]
    async fn test_empty_cart_is_400() {
        let body = json!({ "cart": [], "shippingInfo": { "email": "a@b.co", "fullName": "A" } });
        let (status, body) = send(json_request("POST", URI, &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "success": false, "message": "Cart is empty" }));
    }

    #[tokio::test]
    async fn test_missing_shipping_is_400() {
        let body = json!({ "cart": [line()] });
        let (status, body) = send(json_request("POST", URI, &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Missing shipping information");
    }

    #[tokio::test]
    async fn test_invalid_email_is_400() {
        let body = json!({
            "cart": [line()],
            "shippingInfo": { "email": "nobody", "fullName": "Ada" }
        });
        let (status, body) = send(json_request("POST", URI, &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid email address");
    }

    #[tokio::test]
    async fn test_zero_quantity_is_400() {
        let body = json!({
            "cart": [{ "product": { "price": 20 }, "quantity": 0 }],
            "shippingInfo": { "email": "ada@example.com", "fullName": "Ada" }
        });
        let (status, body) = send(json_request("POST", URI, &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid cart item at position 1");
    }

    #[tokio::test]
    async fn test_overflowing_total_is_400() {
        let body = json!({
            "cart": [{ "product": { "price": "79228162514264337593543950335" }, "quantity": 2 }],
            "shippingInfo": { "email": "ada@example.com", "fullName": "Ada" }
        });
        let (status, body) = send(json_request("POST", URI, &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "success": false, "message": "Order total is too large" }));
    }

    #[tokio::test]
    async fn test_sub_cent_price_is_400() {
        let body = json!({
            "cart": [{ "product": { "price": "19.999" }, "quantity": 1 }],
            "shippingInfo": { "email": "ada@example.com", "fullName": "Ada" }
        });
        let (status, body) = send(json_request("POST", URI, &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid cart item at position 1");
    }

    #[tokio::test]
    async fn test_invalid_subdomain_is_404() {
        let body = json!({
            "cart": [line()],
            "shippingInfo": { "email": "ada@example.com", "fullName": "Ada" }
        });
        let (status, body) = send(json_request("POST", "/api/store-checkout/-nope-", &body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Store not found");
    }

    #[tokio::test]
    async fn test_malformed_json_is_400_envelope() {
        let request = Request::post(URI)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"cart\": ["))
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_database_failure_is_500() {
        let body = json!({
            "cart": [line()],
            "shippingInfo": { "email": "ada@example.com", "fullName": "Ada" }
        });
        let (status, body) = send(json_request("POST", URI, &body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "success": false, "message": "Failed to place order" }));
    }
}
