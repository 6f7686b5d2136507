//! Merchant account commands.
//!
//! ```bash
//! sm-cli merchant create -e owner@acme.test -n "Acme Tees"
//! sm-cli merchant rotate-token -e owner@acme.test
//! ```
//!
//! The plaintext API token is printed exactly once; only its hash is stored.

use shelfmerch_api::db::MerchantRepository;
use shelfmerch_api::db::merchants::{generate_api_token, hash_api_token};
use shelfmerch_core::{Email, MerchantId};

use super::{CommandError, connect};

fn parse_email(email: &str) -> Result<Email, CommandError> {
    Email::parse(email).map_err(|_| CommandError::InvalidEmail(email.to_owned()))
}

#[allow(clippy::print_stdout)]
fn print_token(token: &str) {
    println!();
    println!("API token (shown once, store it now):");
    println!("  {token}");
    println!();
    println!("Send it as: Authorization: Bearer <token>");
}

/// Create a merchant and print its API token.
///
/// # Errors
///
/// Returns an error for an invalid email, a duplicate merchant, or a
/// database failure.
pub async fn create(email: &str, name: &str) -> Result<MerchantId, CommandError> {
    let email = parse_email(email)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CommandError::EmptyName);
    }

    let pool = connect().await?;

    let token = generate_api_token();
    let merchant = MerchantRepository::new(&pool)
        .create(&email, name, &hash_api_token(&token))
        .await?;

    tracing::info!(
        "Merchant created! ID: {}, Email: {}, Name: {}",
        merchant.id,
        merchant.email,
        merchant.name
    );
    print_token(&token);

    Ok(merchant.id)
}

/// Issue a fresh API token, invalidating the old one.
///
/// # Errors
///
/// Returns an error for an invalid or unknown email, or a database failure.
pub async fn rotate_token(email: &str) -> Result<(), CommandError> {
    let email = parse_email(email)?;
    let pool = connect().await?;

    let token = generate_api_token();
    MerchantRepository::new(&pool)
        .rotate_token(&email, &hash_api_token(&token))
        .await?;

    tracing::info!("Token rotated for {email}");
    print_token(&token);

    Ok(())
}
