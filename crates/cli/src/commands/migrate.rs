//! Database migration command.
//!
//! ```bash
//! sm-cli migrate
//! ```
//!
//! Applies every pending migration under `crates/api/migrations/`. The API
//! server does not migrate on startup, so run this before each deploy.

use super::{CommandError, connect};

/// Run all pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    shelfmerch_api::MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
