//! Business logic that spans several repositories.

pub mod checkout;
