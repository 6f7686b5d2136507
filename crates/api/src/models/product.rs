//! Catalogue product domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shelfmerch_core::catalog::{Category, DesignAreas, ProductVariant, TaxRule};
use shelfmerch_core::{Money, ProductId};

/// A catalogue product as stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: Option<String>,
    pub description: String,
    pub category: Category,
    pub base_product: String,
    pub price: Money,
    pub compare_at_price: Option<Money>,
    pub tax_rule: TaxRule,
    pub price_tax_incl: Money,
    /// First mockup, for clients that only show one image.
    pub mockup_url: Option<String>,
    pub mockup_urls: Vec<String>,
    pub designs: DesignAreas,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub variants: Vec<ProductVariant>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
