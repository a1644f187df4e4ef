use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use super::jwt::{token_from_headers, validate_token};
use crate::system::state::AppState;

/// Middleware that requires admin privileges
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = token_from_headers(req.headers()).ok_or(StatusCode::UNAUTHORIZED)?;

    let claims = validate_token(&state.config.security.secret, token)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    if !claims.is_admin {
        return Err(StatusCode::FORBIDDEN);
    }

    // Add claims to request extensions for use in handlers
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
