//! Domain models returned by the repositories and serialised by the API.
//!
//! These are validated domain objects separate from database row types.
//! All of them serialise with camelCase field names.

pub mod customer;
pub mod merchant;
pub mod order;
pub mod product;
pub mod store;

pub use customer::StoreCustomer;
pub use merchant::Merchant;
pub use order::StoreOrder;
pub use product::Product;
pub use store::{PublicStore, Store};
