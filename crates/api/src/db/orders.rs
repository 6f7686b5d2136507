//! Store order repository.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use shelfmerch_core::checkout::{OrderItem, OrderTotals, ShippingInfo};
use shelfmerch_core::{Email, MerchantId, Money, StoreCustomerId, StoreId, StoreOrderId};

use super::{Page, RepositoryError};
use crate::models::StoreOrder;

const ORDER_COLUMNS: &str = "id, merchant_id, store_id, customer_id, customer_email, items, \
     subtotal, shipping, tax, total, shipping_address, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct StoreOrderRow {
    id: StoreOrderId,
    merchant_id: MerchantId,
    store_id: StoreId,
    customer_id: StoreCustomerId,
    customer_email: String,
    items: Json<Vec<OrderItem>>,
    subtotal: Money,
    shipping: Money,
    tax: Money,
    total: Money,
    shipping_address: Json<ShippingInfo>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StoreOrderRow> for StoreOrder {
    type Error = RepositoryError;

    fn try_from(row: StoreOrderRow) -> Result<Self, Self::Error> {
        let customer_email = Email::parse(&row.customer_email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            merchant_id: row.merchant_id,
            store_id: row.store_id,
            customer_id: row.customer_id,
            customer_email,
            items: row.items.0,
            subtotal: row.subtotal,
            shipping: row.shipping,
            tax: row.tax,
            total: row.total,
            shipping_address: row.shipping_address.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Everything needed to insert an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub merchant_id: MerchantId,
    pub store_id: StoreId,
    pub customer_id: StoreCustomerId,
    pub customer_email: Email,
    pub items: Vec<OrderItem>,
    pub totals: OrderTotals,
    pub shipping_address: ShippingInfo,
}

/// Insert an order.
///
/// Takes a connection so checkout can run it inside its transaction.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
#[instrument(skip_all, fields(store_id = %order.store_id, customer_id = %order.customer_id))]
pub async fn insert(conn: &mut PgConnection, order: NewOrder) -> Result<StoreOrder, RepositoryError> {
    let row: StoreOrderRow = sqlx::query_as(&format!(
        r"
        INSERT INTO shelfmerch.store_order
            (merchant_id, store_id, customer_id, customer_email, items,
             subtotal, shipping, tax, total, shipping_address)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {ORDER_COLUMNS}
        "
    ))
    .bind(order.merchant_id)
    .bind(order.store_id)
    .bind(order.customer_id)
    .bind(order.customer_email.as_str())
    .bind(Json(&order.items))
    .bind(order.totals.subtotal)
    .bind(order.totals.shipping)
    .bind(order.totals.tax)
    .bind(order.totals.total)
    .bind(Json(&order.shipping_address))
    .fetch_one(conn)
    .await?;

    row.try_into()
}

/// Repository for store order queries.
pub struct StoreOrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreOrderRepository<'a> {
    /// Create a new store order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Orders of a store, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails or a stored
    /// JSON column no longer decodes.
    pub async fn list_for_store(
        &self,
        store_id: StoreId,
        page: Page,
    ) -> Result<Vec<StoreOrder>, RepositoryError> {
        let rows: Vec<StoreOrderRow> = sqlx::query_as(&format!(
            r"
            SELECT {ORDER_COLUMNS}
            FROM shelfmerch.store_order
            WHERE store_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(store_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(StoreOrder::try_from).collect()
    }

    /// One order of a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_store(
        &self,
        store_id: StoreId,
        order_id: StoreOrderId,
    ) -> Result<Option<StoreOrder>, RepositoryError> {
        let row: Option<StoreOrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM shelfmerch.store_order WHERE store_id = $1 AND id = $2"
        ))
        .bind(store_id)
        .bind(order_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(StoreOrder::try_from).transpose()
    }
}
