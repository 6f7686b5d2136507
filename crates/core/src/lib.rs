//! ShelfMerch Core - Shared domain library.
//!
//! This crate provides the types and rules shared by every ShelfMerch component:
//! - `api` - REST backend for the merchant dashboard and public storefronts
//! - `cli` - Command-line tools for migrations, merchants and catalogue seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. Anything that needs a connection lives in `shelfmerch-api`.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, store slugs and money
//! - [`checkout`] - Cart payloads, validation and order totals
//! - [`catalog`] - Catalogue product validation, variants and tax rules
//! - [`storefront_url`] - Public URL of a merchant storefront

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod storefront_url;
pub mod types;

pub use types::*;
