use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use contracts::domain::a003_storefront_page::aggregate::StorefrontPage;

use super::a001_product_category::service_error;
use crate::domain::a003_storefront_page;
use crate::system::state::AppState;

/// GET /api/pages
pub async fn list_all(
    State(state): State<AppState>,
) -> Result<Json<Vec<StorefrontPage>>, StatusCode> {
    match a003_storefront_page::service::list_all(&state.conn).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list pages: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/pages/:slug
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<StorefrontPage>, StatusCode> {
    match a003_storefront_page::service::get_by_slug(&state.conn, &slug).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load page '{}': {}", slug, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/pages
pub async fn upsert(
    State(state): State<AppState>,
    Json(page): Json<StorefrontPage>,
) -> Result<Json<StorefrontPage>, (StatusCode, String)> {
    a003_storefront_page::service::save(&state.conn, page)
        .await
        .map(Json)
        .map_err(service_error)
}
