//! Store repository.

use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use tracing::instrument;

use shelfmerch_core::{MerchantId, StoreId, StoreSlug};

use super::RepositoryError;
use crate::models::Store;

const STORE_COLUMNS: &str =
    "id, merchant_id, name, slug, description, is_active, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct StoreRow {
    id: StoreId,
    merchant_id: MerchantId,
    name: String,
    slug: String,
    description: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StoreRow> for Store {
    type Error = RepositoryError;

    fn try_from(row: StoreRow) -> Result<Self, Self::Error> {
        let slug = StoreSlug::parse(&row.slug).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid store slug in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            merchant_id: row.merchant_id,
            name: row.name,
            slug,
            description: row.description,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Fields of a new store.
#[derive(Debug, Clone)]
pub struct CreateStore {
    pub merchant_id: MerchantId,
    pub name: String,
    pub slug: StoreSlug,
    pub description: Option<String>,
}

/// Look up an active store by slug.
///
/// Takes any executor so checkout can call it inside its transaction.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn find_active_by_slug<'e>(
    executor: impl PgExecutor<'e>,
    slug: &StoreSlug,
) -> Result<Option<Store>, RepositoryError> {
    let row: Option<StoreRow> = sqlx::query_as(&format!(
        "SELECT {STORE_COLUMNS} FROM shelfmerch.store WHERE slug = $1 AND is_active"
    ))
    .bind(slug.as_str())
    .fetch_optional(executor)
    .await?;

    row.map(Store::try_from).transpose()
}

/// Repository for store database operations.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip_all, fields(merchant_id = %store.merchant_id, slug = %store.slug))]
    pub async fn create(&self, store: &CreateStore) -> Result<Store, RepositoryError> {
        let row: StoreRow = sqlx::query_as(&format!(
            r"
            INSERT INTO shelfmerch.store (merchant_id, name, slug, description)
            VALUES ($1, $2, $3, $4)
            RETURNING {STORE_COLUMNS}
            "
        ))
        .bind(store.merchant_id)
        .bind(&store.name)
        .bind(store.slug.as_str())
        .bind(store.description.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::conflict_on_unique(e, "Store slug is already taken"))?;

        row.try_into()
    }

    /// Get an active store by slug (public lookup).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_active_by_slug(
        &self,
        slug: &StoreSlug,
    ) -> Result<Option<Store>, RepositoryError> {
        find_active_by_slug(self.pool, slug).await
    }

    /// All stores of a merchant, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_merchant(
        &self,
        merchant_id: MerchantId,
    ) -> Result<Vec<Store>, RepositoryError> {
        let rows: Vec<StoreRow> = sqlx::query_as(&format!(
            "SELECT {STORE_COLUMNS} FROM shelfmerch.store WHERE merchant_id = $1 ORDER BY id"
        ))
        .bind(merchant_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Store::try_from).collect()
    }

    /// One store of a merchant by slug, active or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_merchant(
        &self,
        merchant_id: MerchantId,
        slug: &StoreSlug,
    ) -> Result<Option<Store>, RepositoryError> {
        let row: Option<StoreRow> = sqlx::query_as(&format!(
            "SELECT {STORE_COLUMNS} FROM shelfmerch.store WHERE merchant_id = $1 AND slug = $2"
        ))
        .bind(merchant_id)
        .bind(slug.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(Store::try_from).transpose()
    }

    /// Overwrite the editable fields of a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store no longer exists.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip_all, fields(store_id = %store.id))]
    pub async fn update(&self, store: &Store) -> Result<Store, RepositoryError> {
        let row: Option<StoreRow> = sqlx::query_as(&format!(
            r"
            UPDATE shelfmerch.store
            SET name = $2, description = $3, is_active = $4
            WHERE id = $1
            RETURNING {STORE_COLUMNS}
            "
        ))
        .bind(store.id)
        .bind(&store.name)
        .bind(store.description.as_deref())
        .bind(store.is_active)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }
}
