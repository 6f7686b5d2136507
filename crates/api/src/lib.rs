//! ShelfMerch API library.
//!
//! The REST backend behind the merchant dashboard and the public
//! storefronts: stores, store customers, store orders, the product
//! catalogue and storefront checkout. The `shelfmerch-api` binary serves
//! it; `sm-cli` reuses the repositories and migrations.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;

/// Embedded migrations from `crates/api/migrations`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
