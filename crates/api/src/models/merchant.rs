//! Merchant domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shelfmerch_core::{Email, MerchantId};

/// A dashboard account that owns stores.
///
/// The API token hash stays in the database and is never loaded here.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    pub id: MerchantId,
    pub email: Email,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
