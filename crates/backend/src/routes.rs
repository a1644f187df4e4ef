use std::path::Path;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::shared::slider::missing_assets;
use crate::{handlers, system, system::state::AppState};

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    let admin = Router::new()
        // ========================================
        // ADMIN SCREENS
        // ========================================
        .route("/admin/notices", get(handlers::admin::notices))
        .route(
            "/admin/product-categories",
            post(handlers::admin::create_category),
        )
        .route(
            "/admin/product-categories/new",
            get(handlers::admin::new_category),
        )
        .route(
            "/admin/product-categories/:id",
            post(handlers::admin::update_category),
        )
        .route(
            "/admin/product-categories/:id/edit",
            get(handlers::admin::edit_category),
        )
        // ========================================
        // JSON API
        // ========================================
        .route(
            "/api/product-categories",
            get(handlers::a001_product_category::list_all)
                .post(handlers::a001_product_category::upsert),
        )
        .route(
            "/api/product-categories/:id",
            get(handlers::a001_product_category::get_by_id)
                .delete(handlers::a001_product_category::delete),
        )
        .route(
            "/api/media",
            get(handlers::a002_media_attachment::list_all)
                .post(handlers::a002_media_attachment::create),
        )
        .route(
            "/api/media/images",
            get(handlers::a002_media_attachment::list_images),
        )
        .route(
            "/api/media/:id",
            get(handlers::a002_media_attachment::get_by_id),
        )
        .route(
            "/api/pages",
            get(handlers::a003_storefront_page::list_all)
                .post(handlers::a003_storefront_page::upsert),
        )
        .route(
            "/api/pages/:slug",
            get(handlers::a003_storefront_page::get_by_slug),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            system::auth::middleware::require_admin,
        ));

    let mut router = Router::new()
        .route("/health", get(|| async { "ok" }))
        // Storefront (public)
        .route("/pages/:slug", get(handlers::storefront::render_page))
        .merge(admin);

    // Local assets only; an absolute assets_url points at a CDN
    let site = state.config.site.clone();
    let mount = site.assets_url.trim_end_matches('/');
    if mount.starts_with('/') && mount.len() > 1 {
        router = router.nest_service(mount, ServeDir::new(&site.assets_dir));
        let missing = missing_assets(Path::new(&site.assets_dir), &site.assets_url);
        if !missing.is_empty() {
            tracing::warn!(
                "Missing slider assets under {}: {} (run scripts/build-assets.sh)",
                site.assets_dir,
                missing.join(", ")
            );
        }
    }

    router
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .with_state(state)
}
