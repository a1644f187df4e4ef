pub mod extractor;
pub mod jwt;
pub mod middleware;

/// Cookie carrying the admin token for browser sessions
pub const ADMIN_TOKEN_COOKIE: &str = "wcs_admin_token";
