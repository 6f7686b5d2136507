//! Store customer domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shelfmerch_core::{Email, MerchantId, StoreCustomerId, StoreId};

/// An end customer of one store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreCustomer {
    pub id: StoreCustomerId,
    pub store_id: StoreId,
    pub merchant_id: MerchantId,
    pub email: Email,
    pub name: Option<String>,
    /// Never leaves the server.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub last_seen_at: Option<DateTime<Utc>>,
    pub marketing_opt_in: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
