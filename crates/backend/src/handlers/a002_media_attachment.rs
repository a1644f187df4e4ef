use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use contracts::domain::a002_media_attachment::aggregate::{
    MediaAttachment, MediaAttachmentDto, MediaImage,
};

use super::a001_product_category::service_error;
use crate::domain::a002_media_attachment;
use crate::system::state::AppState;

/// GET /api/media
pub async fn list_all(
    State(state): State<AppState>,
) -> Result<Json<Vec<MediaAttachment>>, StatusCode> {
    match a002_media_attachment::service::list_all(&state.conn).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list attachments: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/media/images
pub async fn list_images(
    State(state): State<AppState>,
) -> Result<Json<Vec<MediaImage>>, StatusCode> {
    match a002_media_attachment::service::list_images(&state.conn, &state.config.site.uploads_url)
        .await
    {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list images: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/media/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MediaAttachment>, StatusCode> {
    match a002_media_attachment::service::get_by_id(&state.conn, id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load attachment {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/media
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<MediaAttachmentDto>,
) -> Result<Json<MediaAttachment>, (StatusCode, String)> {
    a002_media_attachment::service::create(&state.conn, dto)
        .await
        .map(Json)
        .map_err(service_error)
}
