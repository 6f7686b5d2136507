//! HTTP middleware stack for the API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transaction)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded into the span, echoed in the response)
//! 4. CORS
//! 5. Rate limiting (checkout route only)
//!
//! Authentication is done per handler with the [`RequireMerchant`] and
//! [`RequireAdmin`] extractors.

pub mod auth;
pub mod rate_limit;
pub mod request_id;

pub use auth::{RequireAdmin, RequireMerchant};
pub use rate_limit::checkout_rate_limiter;
pub use request_id::request_id_middleware;
