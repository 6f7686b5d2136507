//! Store checkout against a running API.
//!
//! The order-flow test assumes the server runs with the default pricing
//! (flat shipping 5.99, tax 8%).

#![allow(clippy::indexing_slicing)]

use reqwest::StatusCode;
use serde_json::{Value, json};
use shelfmerch_core::Money;
use shelfmerch_core::checkout::{CheckoutPricing, CheckoutRequest};
use shelfmerch_integration_tests::{TestContext, merchant_token, status_and_json, unique_slug};

fn checkout_body(email: &str) -> Value {
    json!({
        "cart": [
            {
                "product": {
                    "id": "tee-1",
                    "name": "Premium Cotton T-Shirt",
                    "price": 24.99,
                    "mockupUrl": "https://cdn.example.com/tee.png"
                },
                "quantity": 2,
                "variant": { "size": "M", "color": "Black" }
            }
        ],
        "shippingInfo": {
            "email": email,
            "fullName": "Jane Buyer",
            "address": "1 Main St",
            "city": "Springfield",
            "zipCode": "12345",
            "country": "US",
            "marketingOptIn": true
        }
    })
}

fn money(value: &Value) -> Money {
    serde_json::from_value(value.clone()).expect("money field")
}

async fn create_store(ctx: &TestContext, token: &str) -> String {
    let slug = unique_slug("it-checkout");
    let resp = ctx
        .post("/api/stores")
        .bearer_auth(token)
        .json(&json!({ "name": "Checkout Test Store", "slug": slug }))
        .send()
        .await
        .expect("create store failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    slug
}

#[test]
fn test_expected_totals_for_sample_cart() {
    let request: CheckoutRequest =
        serde_json::from_value(checkout_body("jane@example.com")).expect("valid body");
    let checkout = request.validate().expect("valid checkout");
    let totals = CheckoutPricing::default()
        .totals(&checkout.items)
        .expect("totals in range");

    assert_eq!(totals.subtotal, Money::from_cents(4998));
    assert_eq!(totals.shipping, Money::from_cents(599));
    assert_eq!(totals.tax, Money::from_cents(400));
    assert_eq!(totals.total, Money::from_cents(5997));
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_empty_cart_rejected() {
    let ctx = TestContext::new();
    let resp = ctx
        .post("/api/store-checkout/any-store")
        .json(&json!({ "cart": [], "shippingInfo": { "email": "a@b.test", "fullName": "A" } }))
        .send()
        .await
        .expect("request failed");

    let (status, body) = status_and_json(resp).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "success": false, "message": "Cart is empty" }));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_unknown_store_is_404() {
    let ctx = TestContext::new();
    let resp = ctx
        .post(&format!("/api/store-checkout/{}", unique_slug("missing")))
        .json(&checkout_body("jane@example.com"))
        .send()
        .await
        .expect("request failed");

    let (status, body) = status_and_json(resp).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Store not found");
}

#[tokio::test]
#[ignore = "Requires running API server, database and SHELFMERCH_TEST_MERCHANT_TOKEN"]
async fn test_checkout_creates_order_and_customer() {
    let ctx = TestContext::new();
    let token = merchant_token();
    let slug = create_store(&ctx, &token).await;

    let resp = ctx
        .post(&format!("/api/store-checkout/{slug}"))
        .json(&checkout_body("Jane.Buyer@Example.com"))
        .send()
        .await
        .expect("checkout failed");
    let (status, body) = status_and_json(resp).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);

    let order = &body["data"];
    assert_eq!(money(&order["subtotal"]), Money::from_cents(4998));
    assert_eq!(money(&order["shipping"]), Money::from_cents(599));
    assert_eq!(money(&order["tax"]), Money::from_cents(400));
    assert_eq!(money(&order["total"]), Money::from_cents(5997));
    assert_eq!(order["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(order["items"][0]["quantity"], 2);
    assert_eq!(order["customerEmail"], "Jane.Buyer@Example.com");

    // Second checkout by the same shopper reuses the customer record.
    let resp = ctx
        .post(&format!("/api/store-checkout/{slug}"))
        .json(&checkout_body("Jane.Buyer@Example.com"))
        .send()
        .await
        .expect("second checkout failed");
    let (status, second) = status_and_json(resp).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["data"]["customerId"], order["customerId"]);

    let (status, customers) = status_and_json(
        ctx.get(&format!("/api/stores/{slug}/customers"))
            .bearer_auth(&token)
            .send()
            .await
            .expect("list customers failed"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let customers = customers["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0]["marketingOptIn"], true);
    assert!(customers[0].get("passwordHash").is_none());

    let (status, orders) = status_and_json(
        ctx.get(&format!("/api/stores/{slug}/orders"))
            .bearer_auth(&token)
            .send()
            .await
            .expect("list orders failed"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(orders["data"].as_array().map(Vec::len), Some(2));

    let order_id = &order["id"];
    let (status, fetched) = status_and_json(
        ctx.get(&format!("/api/stores/{slug}/orders/{order_id}"))
            .bearer_auth(&token)
            .send()
            .await
            .expect("get order failed"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["id"], *order_id);
}

#[tokio::test]
#[ignore = "Requires running API server, database and SHELFMERCH_TEST_MERCHANT_TOKEN"]
async fn test_inactive_store_rejects_checkout() {
    let ctx = TestContext::new();
    let token = merchant_token();
    let slug = create_store(&ctx, &token).await;

    let resp = ctx
        .patch(&format!("/api/stores/{slug}"))
        .bearer_auth(&token)
        .json(&json!({ "isActive": false }))
        .send()
        .await
        .expect("deactivate failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ctx
        .post(&format!("/api/store-checkout/{slug}"))
        .json(&checkout_body("jane@example.com"))
        .send()
        .await
        .expect("checkout failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
