//! Seed the catalogue from a YAML file.
//!
//! ```bash
//! sm-cli seed catalog catalog.yaml [--clear]
//! ```
//!
//! The file holds a `products` list using the same fields as the admin
//! `POST /api/admin/products` body:
//!
//! ```yaml
//! products:
//!   - name: Premium Cotton T-Shirt
//!     category: T-Shirts
//!     basePrice: 24.99
//!     taxRule: gst-5
//!     sizes: [S, M, L]
//!     colors: [Black, White]
//!     mockupUrls: [https://cdn.example.com/tee.png]
//! ```
//!
//! Every product is validated before the database is touched; one bad entry
//! aborts the whole run.

use std::path::Path;

use serde::Deserialize;
use tracing::{error, info};

use shelfmerch_api::db::ProductRepository;
use shelfmerch_core::catalog::{NewProduct, ProductDraft};

use super::{CommandError, connect};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<NewProduct>,
}

/// Parse and validate a catalogue file's contents.
///
/// Errors are reported per product as `#index (name): reason`.
fn parse_catalog(content: &str) -> Result<Vec<ProductDraft>, CommandError> {
    let file: CatalogFile = serde_yaml::from_str(content)
        .map_err(|e| CommandError::Seed(format!("Invalid catalogue YAML: {e}")))?;

    if file.products.is_empty() {
        return Err(CommandError::Seed("Catalogue file lists no products".to_owned()));
    }

    let mut drafts = Vec::with_capacity(file.products.len());
    let mut errors = Vec::new();

    for (index, product) in file.products.into_iter().enumerate() {
        let label = format!("#{} ({})", index + 1, product.name.trim());
        match product.validate() {
            Ok(draft) => drafts.push(draft),
            Err(e) => errors.push(format!("{label}: {e}")),
        }
    }

    if !errors.is_empty() {
        error!("Catalogue validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(CommandError::Seed(format!(
            "{} validation errors found",
            errors.len()
        )));
    }

    Ok(drafts)
}

/// Load catalogue products from `file_path`.
///
/// # Errors
///
/// Returns an error if the file is unreadable or invalid, or a database
/// operation fails.
pub async fn catalog(file_path: &str, clear_existing: bool) -> Result<(), CommandError> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(CommandError::Seed(format!("File not found: {file_path}")));
    }

    info!(path = %file_path, "Loading catalogue from file");
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CommandError::Seed(format!("Cannot read {file_path}: {e}")))?;

    let drafts = parse_catalog(&content)?;
    info!(products = drafts.len(), "Catalogue validated");

    let pool = connect().await?;
    let products = ProductRepository::new(&pool);

    if clear_existing {
        let removed = products.delete_all().await?;
        info!(removed, "Cleared existing products");
    }

    for draft in &drafts {
        let product = products.create(draft).await?;
        info!(id = %product.id, name = %product.name, "Inserted product");
    }

    info!("Seeding complete! {} products inserted", drafts.len());
    Ok(())
}
