//! Merchant repository.
//!
//! Merchants authenticate with an opaque API token. Only its SHA-256 hex
//! digest is stored, so lookups go through [`hash_api_token`].

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tracing::instrument;

use shelfmerch_core::{Email, MerchantId};

use super::RepositoryError;
use crate::models::Merchant;

/// Random bytes in a freshly issued API token.
const API_TOKEN_BYTES: usize = 32;

#[derive(sqlx::FromRow)]
struct MerchantRow {
    id: MerchantId,
    email: String,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MerchantRow> for Merchant {
    type Error = RepositoryError;

    fn try_from(row: MerchantRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            email,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Generate a new API token: 32 random bytes, base64url without padding.
#[must_use]
pub fn generate_api_token() -> String {
    let mut bytes = [0u8; API_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// SHA-256 hex digest of an API token, as stored in `merchant.api_token_hash`.
#[must_use]
pub fn hash_api_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Repository for merchant database operations.
pub struct MerchantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MerchantRepository<'a> {
    /// Create a new merchant repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a merchant with the given token hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip_all, fields(email = %email))]
    pub async fn create(
        &self,
        email: &Email,
        name: &str,
        api_token_hash: &str,
    ) -> Result<Merchant, RepositoryError> {
        let row: MerchantRow = sqlx::query_as(
            r"
            INSERT INTO shelfmerch.merchant (email, name, api_token_hash)
            VALUES ($1, $2, $3)
            RETURNING id, email, name, created_at, updated_at
            ",
        )
        .bind(email.as_str())
        .bind(name)
        .bind(api_token_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::conflict_on_unique(e, "merchant email already exists"))?;

        row.try_into()
    }

    /// Find the merchant owning an API token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_by_api_token(&self, token: &str) -> Result<Option<Merchant>, RepositoryError> {
        let row: Option<MerchantRow> = sqlx::query_as(
            r"
            SELECT id, email, name, created_at, updated_at
            FROM shelfmerch.merchant
            WHERE api_token_hash = $1
            ",
        )
        .bind(hash_api_token(token))
        .fetch_optional(self.pool)
        .await?;

        row.map(Merchant::try_from).transpose()
    }

    /// Replace a merchant's API token hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no merchant has this email.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip_all, fields(email = %email))]
    pub async fn rotate_token(
        &self,
        email: &Email,
        api_token_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE shelfmerch.merchant
            SET api_token_hash = $2
            WHERE email = $1
            ",
        )
        .bind(email.as_str())
        .bind(api_token_hash)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_api_token_shape() {
        let token = generate_api_token();
        // 32 bytes -> 43 base64url chars without padding
        assert_eq!(token.len(), 43);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_ne!(token, generate_api_token());
    }

    #[test]
    fn test_hash_api_token_is_sha256_hex() {
        assert_eq!(
            hash_api_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(hash_api_token("abc").len(), 64);
    }
}
