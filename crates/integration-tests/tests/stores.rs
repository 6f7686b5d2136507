//! Merchant store management against a running API.

use reqwest::StatusCode;
use serde_json::json;
use shelfmerch_integration_tests::{TestContext, merchant_token, status_and_json, unique_slug};

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_store_routes_require_token() {
    let ctx = TestContext::new();
    for path in ["/api/stores", "/api/stores/acme-tees/orders"] {
        let resp = ctx.get(path).send().await.expect("request failed");
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{path}");
    }
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_unknown_public_store_is_404() {
    let ctx = TestContext::new();
    let (status, body) = status_and_json(
        ctx.get(&format!("/api/public/stores/{}", unique_slug("nobody")))
            .send()
            .await
            .expect("request failed"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Store not found");
}

#[tokio::test]
#[ignore = "Requires running API server, database and SHELFMERCH_TEST_MERCHANT_TOKEN"]
async fn test_store_lifecycle() {
    let ctx = TestContext::new();
    let token = merchant_token();
    let slug = unique_slug("it-store");

    let (status, created) = status_and_json(
        ctx.post("/api/stores")
            .bearer_auth(&token)
            .json(&json!({ "name": "  Acme Tees  ", "slug": slug, "description": "Shirts" }))
            .send()
            .await
            .expect("create failed"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["name"], "Acme Tees");
    assert_eq!(created["data"]["isActive"], true);

    let (status, body) = status_and_json(
        ctx.post("/api/stores")
            .bearer_auth(&token)
            .json(&json!({ "name": "Copycat", "slug": slug }))
            .send()
            .await
            .expect("duplicate create failed"),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Store slug is already taken");

    let (status, public) = status_and_json(
        ctx.get(&format!("/api/public/stores/{slug}"))
            .send()
            .await
            .expect("public lookup failed"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(public["data"]["slug"], slug.as_str());
    assert!(public["data"].get("merchantId").is_none());

    let (status, updated) = status_and_json(
        ctx.patch(&format!("/api/stores/{slug}"))
            .bearer_auth(&token)
            .json(&json!({ "description": "", "isActive": false }))
            .send()
            .await
            .expect("update failed"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(updated["data"]["description"].is_null());
    assert_eq!(updated["data"]["isActive"], false);

    let resp = ctx
        .get(&format!("/api/public/stores/{slug}"))
        .send()
        .await
        .expect("public lookup failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let (status, listed) = status_and_json(
        ctx.get("/api/stores")
            .bearer_auth(&token)
            .send()
            .await
            .expect("list failed"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        listed["data"]
            .as_array()
            .is_some_and(|stores| stores.iter().any(|s| s["slug"] == slug.as_str()))
    );
}

#[tokio::test]
#[ignore = "Requires running API server and SHELFMERCH_TEST_MERCHANT_TOKEN"]
async fn test_invalid_slug_rejected() {
    let ctx = TestContext::new();
    let (status, body) = status_and_json(
        ctx.post("/api/stores")
            .bearer_auth(merchant_token())
            .json(&json!({ "name": "Bad Slug", "slug": "Not A Slug!" }))
            .send()
            .await
            .expect("request failed"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .is_some_and(|m| m.starts_with("Invalid store slug"))
    );
}
