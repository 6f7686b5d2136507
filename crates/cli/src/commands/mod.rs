//! CLI command implementations.

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use shelfmerch_api::db::{self, RepositoryError};

pub mod merchant;
pub mod migrate;
pub mod seed;

/// Errors shared by every command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0} (or DATABASE_URL)")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Merchant name is blank.
    #[error("Merchant name must not be empty")]
    EmptyName,

    /// Seed file problem.
    #[error("{0}")]
    Seed(String),
}

const DATABASE_URL_VAR: &str = "SHELFMERCH_DATABASE_URL";

/// Connect using `SHELFMERCH_DATABASE_URL`, falling back to `DATABASE_URL`.
pub(crate) async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var(DATABASE_URL_VAR)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar(DATABASE_URL_VAR))?;

    tracing::info!("Connecting to database...");
    Ok(db::create_pool(&database_url).await?)
}
