//! Storefront checkout.
//!
//! Validates the payload and computes totals, then in one transaction finds
//! the active store, upserts the customer and inserts the order.

use sqlx::PgPool;
use tracing::instrument;

use shelfmerch_core::StoreSlug;
use shelfmerch_core::checkout::{CheckoutPricing, CheckoutRequest, OrderTotals, ValidatedCheckout};

use crate::db::orders::{self, NewOrder};
use crate::db::{RepositoryError, customers, stores};
use crate::error::AppError;
use crate::models::StoreOrder;

/// Place an order for the store served at `subdomain`.
///
/// # Errors
///
/// - `AppError::Checkout` when the payload is invalid or its totals are
///   out of range (nothing is written)
/// - `AppError::NotFound` when no active store has this slug
/// - `AppError::OrderFailed` when the database work fails (rolled back)
#[instrument(skip(pool, pricing, request))]
pub async fn place_order(
    pool: &PgPool,
    pricing: &CheckoutPricing,
    subdomain: &str,
    request: CheckoutRequest,
) -> Result<StoreOrder, AppError> {
    let checkout = request.validate()?;
    let totals = pricing.totals(&checkout.items)?;

    let Ok(slug) = StoreSlug::parse(subdomain) else {
        return Err(AppError::NotFound("Store"));
    };

    let order = persist(pool, &slug, checkout, totals)
        .await
        .map_err(|err| match err {
            PlaceOrderError::StoreNotFound => AppError::NotFound("Store"),
            PlaceOrderError::Repository(e) => {
                tracing::error!(store = %slug, error = %e, "Checkout failed");
                AppError::OrderFailed(e)
            }
        })?;

    tracing::info!(
        store = %slug,
        order_id = %order.id,
        total = %order.total,
        items = order.items.len(),
        "Order placed"
    );
    Ok(order)
}

enum PlaceOrderError {
    StoreNotFound,
    Repository(RepositoryError),
}

impl From<RepositoryError> for PlaceOrderError {
    fn from(err: RepositoryError) -> Self {
        Self::Repository(err)
    }
}

impl From<sqlx::Error> for PlaceOrderError {
    fn from(err: sqlx::Error) -> Self {
        Self::Repository(err.into())
    }
}

/// Store lookup, customer upsert and order insert in one transaction.
/// Dropping the transaction on an early return rolls it back.
async fn persist(
    pool: &PgPool,
    slug: &StoreSlug,
    checkout: ValidatedCheckout,
    totals: OrderTotals,
) -> Result<StoreOrder, PlaceOrderError> {
    let mut tx = pool.begin().await?;

    let store = stores::find_active_by_slug(&mut *tx, slug)
        .await?
        .ok_or(PlaceOrderError::StoreNotFound)?;

    let customer = customers::upsert_for_checkout(
        &mut *tx,
        &store,
        &checkout.email,
        &checkout.full_name,
        checkout.marketing_opt_in(),
    )
    .await?;

    let order = orders::insert(
        &mut *tx,
        NewOrder {
            merchant_id: store.merchant_id,
            store_id: store.id,
            customer_id: customer.id,
            customer_email: customer.email,
            items: checkout.order_items(),
            totals,
            shipping_address: checkout.shipping,
        },
    )
    .await?;

    tx.commit().await?;
    Ok(order)
}
