//! Store domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shelfmerch_core::storefront_url::StorefrontUrls;
use shelfmerch_core::{MerchantId, StoreId, StoreSlug};

/// A merchant storefront.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: StoreId,
    pub merchant_id: MerchantId,
    pub name: String,
    pub slug: StoreSlug,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What anonymous storefront visitors may see of a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicStore {
    pub id: StoreId,
    pub name: String,
    pub slug: StoreSlug,
    pub description: Option<String>,
    /// Public storefront URL.
    pub url: String,
}

impl PublicStore {
    #[must_use]
    pub fn from_store(store: &Store, urls: &StorefrontUrls) -> Self {
        Self {
            id: store.id,
            name: store.name.clone(),
            url: urls.store_url(&store.slug),
            slug: store.slug.clone(),
            description: store.description.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_public_store_hides_owner_and_adds_url() {
        let now = Utc::now();
        let store = Store {
            id: StoreId::new(7),
            merchant_id: MerchantId::new(3),
            name: "Acme Tees".to_owned(),
            slug: StoreSlug::parse("acme-tees").unwrap(),
            description: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let public = PublicStore::from_store(&store, &StorefrontUrls::default());
        let json = serde_json::to_value(&public).unwrap();

        assert_eq!(json["url"], "http://localhost:8080/store/acme-tees");
        assert_eq!(json["slug"], "acme-tees");
        assert!(json.get("merchantId").is_none());
        assert!(json.get("isActive").is_none());
    }
}
