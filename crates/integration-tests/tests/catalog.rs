//! Catalogue endpoints against a running API.

use reqwest::StatusCode;
use serde_json::{Value, json};
use shelfmerch_integration_tests::{TestContext, admin_token, status_and_json, unique_slug};

fn product_body(name: &str) -> Value {
    json!({
        "name": name,
        "brand": "ShelfMerch",
        "description": "Soft ringspun cotton",
        "category": "T-Shirts",
        "basePrice": 24.99,
        "taxRule": "gst-5",
        "sizes": ["S", "M"],
        "colors": ["Black", "White"],
        "mockupUrls": ["https://cdn.example.com/tee.png"]
    })
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_catalog_options() {
    let ctx = TestContext::new();
    let (status, body) = status_and_json(
        ctx.get("/api/catalog/options")
            .send()
            .await
            .expect("request failed"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["categories"].as_array().is_some_and(|c| !c.is_empty()));
    assert!(body["data"]["taxRules"].as_array().is_some_and(|t| t.len() == 4));
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_unknown_category_filter() {
    let ctx = TestContext::new();
    let (status, body) = status_and_json(
        ctx.get("/api/products?category=socks")
            .send()
            .await
            .expect("request failed"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Unknown category: socks");
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_admin_routes_require_token() {
    let ctx = TestContext::new();
    let resp = ctx
        .post("/api/admin/products")
        .bearer_auth("not-the-admin-token")
        .json(&product_body("Sneaky Tee"))
        .send()
        .await
        .expect("request failed");

    let (status, body) = status_and_json(resp).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "success": false, "message": "Unauthorized" }));
}

#[tokio::test]
#[ignore = "Requires running API server, database and SHELFMERCH_ADMIN_TOKEN"]
async fn test_product_lifecycle() {
    let ctx = TestContext::new();
    let token = admin_token();
    let name = unique_slug("IT Tee");

    let (status, created) = status_and_json(
        ctx.post("/api/admin/products")
            .bearer_auth(&token)
            .json(&product_body(&name))
            .send()
            .await
            .expect("create failed"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let product = &created["data"];
    let id = product["id"].clone();
    assert_eq!(product["variants"].as_array().map(Vec::len), Some(4));
    assert_eq!(product["priceTaxIncl"], "26.24");

    let (status, fetched) = status_and_json(
        ctx.get(&format!("/api/products/{id}"))
            .send()
            .await
            .expect("get failed"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["name"], name);

    let mut replacement = product_body(&name);
    replacement["sizes"] = json!(["XL"]);
    let (status, replaced) = status_and_json(
        ctx.put(&format!("/api/admin/products/{id}"))
            .bearer_auth(&token)
            .json(&replacement)
            .send()
            .await
            .expect("replace failed"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["data"]["variants"].as_array().map(Vec::len), Some(2));

    let (status, deleted) = status_and_json(
        ctx.delete(&format!("/api/admin/products/{id}"))
            .bearer_auth(&token)
            .send()
            .await
            .expect("delete failed"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["data"]["id"], id);

    let resp = ctx
        .get(&format!("/api/products/{id}"))
        .send()
        .await
        .expect("get failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server and SHELFMERCH_ADMIN_TOKEN"]
async fn test_invalid_product_rejected() {
    let ctx = TestContext::new();
    let mut body = product_body("No Mockups");
    body["mockupUrls"] = json!([]);

    let (status, body) = status_and_json(
        ctx.post("/api/admin/products")
            .bearer_auth(admin_token())
            .json(&body)
            .send()
            .await
            .expect("request failed"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please upload at least one mockup image");
}
