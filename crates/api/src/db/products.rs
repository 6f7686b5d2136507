//! Catalogue product repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::{debug, instrument};

use shelfmerch_core::catalog::{Category, DesignAreas, ProductDraft, ProductVariant, TaxRule};
use shelfmerch_core::{Money, ProductId};

use super::{Page, RepositoryError};
use crate::models::Product;

const PRODUCT_COLUMNS: &str = "id, name, brand, description, category, base_product, price, \
     compare_at_price, tax_rule, price_tax_incl, mockup_urls, design_front, design_back, \
     sizes, colors, variants, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    brand: Option<String>,
    description: String,
    category: String,
    base_product: String,
    price: Money,
    compare_at_price: Option<Money>,
    tax_rule: String,
    price_tax_incl: Money,
    mockup_urls: Vec<String>,
    design_front: Option<String>,
    design_back: Option<String>,
    sizes: Vec<String>,
    colors: Vec<String>,
    variants: Json<Vec<ProductVariant>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let category: Category = row.category.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid category in database: {e}"))
        })?;
        let tax_rule: TaxRule = row
            .tax_rule
            .parse()
            .map_err(|e| RepositoryError::DataCorruption(format!("{e} in database")))?;

        Ok(Self {
            id: row.id,
            name: row.name,
            brand: row.brand,
            description: row.description,
            category,
            base_product: row.base_product,
            price: row.price,
            compare_at_price: row.compare_at_price,
            tax_rule,
            price_tax_incl: row.price_tax_incl,
            mockup_url: row.mockup_urls.first().cloned(),
            mockup_urls: row.mockup_urls,
            designs: DesignAreas {
                front: row.design_front,
                back: row.design_back,
            },
            sizes: row.sizes,
            colors: row.colors,
            variants: row.variants.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for catalogue products.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a validated product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip_all, fields(name = %draft.name, category = %draft.category))]
    pub async fn create(&self, draft: &ProductDraft) -> Result<Product, RepositoryError> {
        let row: ProductRow = sqlx::query_as(&format!(
            r"
            INSERT INTO shelfmerch.product
                (name, brand, description, category, base_product, price, compare_at_price,
                 tax_rule, price_tax_incl, mockup_urls, design_front, design_back,
                 sizes, colors, variants)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(&draft.name)
        .bind(draft.brand.as_deref())
        .bind(&draft.description)
        .bind(draft.category.name())
        .bind(&draft.base_product)
        .bind(draft.price)
        .bind(draft.compare_at_price)
        .bind(draft.tax_rule.id())
        .bind(draft.price_tax_incl)
        .bind(&draft.mockup_urls)
        .bind(draft.designs.front.as_deref())
        .bind(draft.designs.back.as_deref())
        .bind(&draft.sizes)
        .bind(&draft.colors)
        .bind(Json(&draft.variants))
        .fetch_one(self.pool)
        .await?;

        debug!(id = %row.id, variants = draft.variants.len(), "Created product");
        row.try_into()
    }

    /// Replace every field of an existing product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, draft))]
    pub async fn replace(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Product, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            r"
            UPDATE shelfmerch.product
            SET name = $2, brand = $3, description = $4, category = $5, base_product = $6,
                price = $7, compare_at_price = $8, tax_rule = $9, price_tax_incl = $10,
                mockup_urls = $11, design_front = $12, design_back = $13,
                sizes = $14, colors = $15, variants = $16
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(id)
        .bind(&draft.name)
        .bind(draft.brand.as_deref())
        .bind(&draft.description)
        .bind(draft.category.name())
        .bind(&draft.base_product)
        .bind(draft.price)
        .bind(draft.compare_at_price)
        .bind(draft.tax_rule.id())
        .bind(draft.price_tax_incl)
        .bind(&draft.mockup_urls)
        .bind(draft.designs.front.as_deref())
        .bind(draft.designs.back.as_deref())
        .bind(&draft.sizes)
        .bind(&draft.colors)
        .bind(Json(&draft.variants))
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM shelfmerch.product WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Delete the whole catalogue. Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM shelfmerch.product")
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM shelfmerch.product WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// List products, newest first, optionally within one category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        category: Option<Category>,
        page: Page,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM shelfmerch.product
            WHERE $1::TEXT IS NULL OR category = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(category.map(Category::name))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }
}
