//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHELFMERCH_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `SHELFMERCH_ADMIN_TOKEN` - Bearer token for catalogue writes (min 32 chars, high entropy)
//!
//! ## Optional
//! - `SHELFMERCH_HOST` - Bind address (default: 127.0.0.1)
//! - `SHELFMERCH_PORT` - Listen port (default: 5000)
//! - `STORE_BASE_URL` - Base for public storefront URLs (default: `http://localhost:8080`)
//! - `SHELFMERCH_CORS_ORIGINS` - Comma-separated allowed origins (default: any)
//! - `SHELFMERCH_FLAT_SHIPPING` - Flat shipping fee per order (default: 5.99)
//! - `SHELFMERCH_TAX_RATE` - Tax rate as a fraction (default: 0.08)
//! - `SHELFMERCH_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use shelfmerch_core::Money;
use shelfmerch_core::checkout::CheckoutPricing;
use shelfmerch_core::storefront_url::{DEFAULT_STORE_BASE_URL, StorefrontUrls};
use thiserror::Error;

const MIN_ADMIN_TOKEN_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
        }
    }
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// Bearer token guarding `/api/admin/*`
    pub admin_token: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Builds public storefront URLs
    pub storefront_urls: StorefrontUrls,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
    /// Checkout shipping and tax parameters
    pub pricing: CheckoutPricing,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. production, staging)
    pub sentry_environment: Option<String>,
    /// Error event sample rate
    pub sentry_sample_rate: f32,
    /// Performance transaction sample rate
    pub sentry_traces_sample_rate: f32,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the admin token fails validation (length, placeholder, entropy).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("SHELFMERCH_DATABASE_URL")?;
        let admin_token = get_validated_secret("SHELFMERCH_ADMIN_TOKEN")?;
        validate_token_length(&admin_token, "SHELFMERCH_ADMIN_TOKEN")?;

        let host = parse_env("SHELFMERCH_HOST", "127.0.0.1")?;
        let port = parse_env("SHELFMERCH_PORT", "5000")?;

        let store_base_url = get_env_or_default("STORE_BASE_URL", DEFAULT_STORE_BASE_URL);
        let storefront_urls = StorefrontUrls::new(&store_base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("STORE_BASE_URL".to_string(), e.to_string()))?;

        let cors_origins = parse_origins(&get_env_or_default("SHELFMERCH_CORS_ORIGINS", ""));

        let defaults = CheckoutPricing::default();
        let flat_shipping: Decimal = parse_env(
            "SHELFMERCH_FLAT_SHIPPING",
            &defaults.flat_shipping.amount().to_string(),
        )?;
        let tax_rate: Decimal =
            parse_env("SHELFMERCH_TAX_RATE", &defaults.tax_rate.to_string())?;
        let pricing = validate_pricing(flat_shipping, tax_rate)?;

        let log_format = parse_env("SHELFMERCH_LOG_FORMAT", "pretty")?;

        Ok(Self {
            database_url,
            admin_token,
            host,
            port,
            storefront_urls,
            cors_origins,
            pricing,
            log_format,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Split a comma-separated origin list, dropping blanks and trailing slashes.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

/// Reject negative shipping fees and tax rates outside `0..=1`.
fn validate_pricing(flat_shipping: Decimal, tax_rate: Decimal) -> Result<CheckoutPricing, ConfigError> {
    if flat_shipping.is_sign_negative() {
        return Err(ConfigError::InvalidEnvVar(
            "SHELFMERCH_FLAT_SHIPPING".to_string(),
            "must not be negative".to_string(),
        ));
    }
    if tax_rate.is_sign_negative() || tax_rate > Decimal::ONE {
        return Err(ConfigError::InvalidEnvVar(
            "SHELFMERCH_TAX_RATE".to_string(),
            "must be a fraction between 0 and 1".to_string(),
        ));
    }
    Ok(CheckoutPricing {
        flat_shipping: Money::new(flat_shipping).round_to_cents(),
        tax_rate,
    })
}

/// Validate that a token meets minimum length requirements.
fn validate_token_length(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_ADMIN_TOKEN_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_ADMIN_TOKEN_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
