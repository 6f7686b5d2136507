//! Integration tests for the ShelfMerch API.
//!
//! The HTTP tests talk to a running `shelfmerch-api` and are `#[ignore]`d by
//! default:
//!
//! ```bash
//! sm-cli migrate
//! sm-cli merchant create -e it@shelfmerch.test -n "Integration"
//! export SHELFMERCH_TEST_MERCHANT_TOKEN=<printed token>
//! cargo run -p shelfmerch-api &
//! cargo test -p shelfmerch-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `SHELFMERCH_API_URL` - API base URL (default: `http://127.0.0.1:5000`)
//! - `SHELFMERCH_ADMIN_TOKEN` - Admin token the server was started with
//! - `SHELFMERCH_TEST_MERCHANT_TOKEN` - API token of a test merchant

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;

/// Default API location.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Shared HTTP client and credentials for one test.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Build a context from the environment.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn new() -> Self {
        let base_url = std::env::var("SHELFMERCH_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let client = Client::builder()
            .build()
            .expect("Failed to create HTTP client");
        Self { client, base_url }
    }

    /// Absolute URL for a path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        self.client.put(self.url(path))
    }

    pub fn patch(&self, path: &str) -> RequestBuilder {
        self.client.patch(self.url(path))
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.client.delete(self.url(path))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a required credential.
///
/// # Panics
///
/// Panics if the variable is unset.
#[must_use]
pub fn required_env(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| panic!("{key} must be set for integration tests"))
}

/// Admin bearer token.
#[must_use]
pub fn admin_token() -> String {
    required_env("SHELFMERCH_ADMIN_TOKEN")
}

/// Test merchant bearer token.
#[must_use]
pub fn merchant_token() -> String {
    required_env("SHELFMERCH_TEST_MERCHANT_TOKEN")
}

/// A slug no earlier run has used.
#[must_use]
pub fn unique_slug(prefix: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", suffix.get(..8).unwrap_or("run"))
}

/// Status and JSON body of a response.
///
/// # Panics
///
/// Panics if the body is not JSON.
pub async fn status_and_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = response.json().await.expect("response body is not JSON");
    (status, body)
}
