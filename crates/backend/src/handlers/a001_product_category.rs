use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use contracts::domain::a001_product_category::aggregate::{ProductCategory, ProductCategoryDto};
use serde_json::json;

use crate::domain::a001_product_category;
use crate::system::state::AppState;

/// GET /api/product-categories
pub async fn list_all(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductCategory>>, StatusCode> {
    match a001_product_category::service::list_all(&state.conn).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list product categories: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/product-categories/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductCategory>, StatusCode> {
    match a001_product_category::service::get_by_id(&state.conn, id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load product category {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/product-categories
pub async fn upsert(
    State(state): State<AppState>,
    Json(dto): Json<ProductCategoryDto>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let result = match dto.id {
        Some(id) => a001_product_category::service::update(&state.conn, id, dto).await,
        None => a001_product_category::service::create(&state.conn, dto).await,
    };

    match result {
        Ok(category) => Ok(Json(json!({"id": category.id.value()}))),
        Err(e) => Err(service_error(e)),
    }
}

/// DELETE /api/product-categories/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(), StatusCode> {
    match a001_product_category::service::delete(&state.conn, state.meta.as_ref(), id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete product category {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Validation and not-found failures are the caller's fault
pub(crate) fn service_error(e: anyhow::Error) -> (StatusCode, String) {
    let message = e.to_string();
    if message.starts_with("Validation failed") {
        (StatusCode::BAD_REQUEST, message)
    } else if message == "Not found" {
        (StatusCode::NOT_FOUND, message)
    } else {
        tracing::error!("Request failed: {}", message);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
    }
}
