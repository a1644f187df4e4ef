use anyhow::{bail, Context, Result};
use axum::http::{header, HeaderMap};
use chrono::Utc;
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use super::ADMIN_TOKEN_COOKIE;
use crate::shared::config::SecurityConfig;

const ACCESS_TOKEN_LIFETIME_HOURS: i64 = 24 * 30;

/// Generate HS256 access token signed with the site secret
pub fn generate_access_token(
    secret: &str,
    user_id: &str,
    username: &str,
    is_admin: bool,
) -> Result<String> {
    let now = Utc::now();
    let exp = (now + chrono::Duration::hours(ACCESS_TOKEN_LIFETIME_HOURS)).timestamp() as usize;
    let iat = now.timestamp() as usize;

    let claims = TokenClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        is_admin,
        exp,
        iat,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")
}

/// Admin token for the `token` command.
///
/// Refuses a per-process secret: the server would reject the token after restart.
pub fn issue_admin_token(security: &SecurityConfig, username: &str) -> Result<String> {
    if security.ephemeral_secret || security.secret.trim().is_empty() {
        bail!("security.secret is not set in config.toml; admin tokens need a persistent secret");
    }
    generate_access_token(&security.secret, username, username, true)
}

/// Validate JWT token and extract claims
pub fn validate_token(secret: &str, token: &str) -> Result<TokenClaims> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;

    Ok(token_data.claims)
}

/// Token from `Authorization: Bearer …` or, failing that, the admin cookie
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));
    if bearer.is_some() {
        return bearer;
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == ADMIN_TOKEN_COOKIE)
        .map(|(_, value)| value)
}
