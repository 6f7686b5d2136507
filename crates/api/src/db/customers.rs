//! Store customer repository.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use shelfmerch_core::{Email, MerchantId, StoreCustomerId, StoreId};

use super::{Page, RepositoryError};
use crate::models::{Store, StoreCustomer};

const CUSTOMER_COLUMNS: &str = "id, store_id, merchant_id, email, name, password_hash, \
     last_seen_at, marketing_opt_in, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct StoreCustomerRow {
    id: StoreCustomerId,
    store_id: StoreId,
    merchant_id: MerchantId,
    email: String,
    name: Option<String>,
    password_hash: Option<String>,
    last_seen_at: Option<DateTime<Utc>>,
    marketing_opt_in: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StoreCustomerRow> for StoreCustomer {
    type Error = RepositoryError;

    fn try_from(row: StoreCustomerRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            store_id: row.store_id,
            merchant_id: row.merchant_id,
            email,
            name: row.name,
            password_hash: row.password_hash,
            last_seen_at: row.last_seen_at,
            marketing_opt_in: row.marketing_opt_in,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Create or touch the customer for `(store, email)` at checkout.
///
/// A new row gets `name` and `last_seen_at = NOW()`. An existing row only
/// has `last_seen_at` refreshed and `marketing_opt_in` raised when the
/// customer opted in; the name is left as first recorded. The unique
/// `(store_id, email)` index makes concurrent first checkouts converge on
/// one row.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the statement fails.
#[instrument(skip_all, fields(store_id = %store.id))]
pub async fn upsert_for_checkout(
    conn: &mut PgConnection,
    store: &Store,
    email: &Email,
    name: &str,
    marketing_opt_in: bool,
) -> Result<StoreCustomer, RepositoryError> {
    let row: StoreCustomerRow = sqlx::query_as(&format!(
        r"
        INSERT INTO shelfmerch.store_customer
            (store_id, merchant_id, email, name, last_seen_at, marketing_opt_in)
        VALUES ($1, $2, $3, $4, NOW(), $5)
        ON CONFLICT (store_id, email) DO UPDATE
        SET last_seen_at = NOW(),
            marketing_opt_in = store_customer.marketing_opt_in OR EXCLUDED.marketing_opt_in
        RETURNING {CUSTOMER_COLUMNS}
        "
    ))
    .bind(store.id)
    .bind(store.merchant_id)
    .bind(email.as_str())
    .bind(name)
    .bind(marketing_opt_in)
    .fetch_one(conn)
    .await?;

    row.try_into()
}

/// Repository for store customer queries.
pub struct StoreCustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreCustomerRepository<'a> {
    /// Create a new store customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Customers of a store, most recently seen first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_store(
        &self,
        store_id: StoreId,
        page: Page,
    ) -> Result<Vec<StoreCustomer>, RepositoryError> {
        let rows: Vec<StoreCustomerRow> = sqlx::query_as(&format!(
            r"
            SELECT {CUSTOMER_COLUMNS}
            FROM shelfmerch.store_customer
            WHERE store_id = $1
            ORDER BY last_seen_at DESC NULLS LAST, id DESC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(store_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(StoreCustomer::try_from).collect()
    }
}
