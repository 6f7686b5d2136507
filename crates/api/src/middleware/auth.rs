//! Bearer-token authentication extractors.
//!
//! Merchants send the API token issued by `sm-cli merchant create`; the
//! platform admin sends `SHELFMERCH_ADMIN_TOKEN`. Both use
//! `Authorization: Bearer <token>` and are rejected with a 401 envelope.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::db::MerchantRepository;
use crate::error::AppError;
use crate::models::Merchant;
use crate::state::AppState;

/// Extract the bearer token from the `Authorization` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Extractor that requires a merchant API token.
///
/// # Example
///
/// ```rust,ignore
/// async fn list_stores(RequireMerchant(merchant): RequireMerchant) -> impl IntoResponse {
///     format!("Stores of {}", merchant.name)
/// }
/// ```
pub struct RequireMerchant(pub Merchant);

impl FromRequestParts<AppState> for RequireMerchant {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;

        let merchant = MerchantRepository::new(state.pool())
            .get_by_api_token(token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        sentry::configure_scope(|scope| {
            scope.set_user(Some(sentry::User {
                id: Some(merchant.id.to_string()),
                email: Some(merchant.email.to_string()),
                ..Default::default()
            }));
        });
        tracing::Span::current().record("merchant_id", merchant.id.as_i32());

        Ok(Self(merchant))
    }
}

/// Extractor that requires the platform admin token.
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;
        if state.is_admin_token(token) {
            Ok(Self)
        } else {
            tracing::warn!("Rejected admin request with wrong token");
            Err(AppError::Unauthorized)
        }
    }
}
