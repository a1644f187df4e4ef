use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};
use contracts::domain::a003_storefront_page::aggregate::StorefrontPage;

use crate::domain::a003_storefront_page;
use crate::shared::html::{esc_attr, esc_html};
use crate::shared::slider::{PageAssets, PageRenderContext};
use crate::system::auth::extractor::Viewer;
use crate::system::state::AppState;

/// GET /pages/:slug
pub async fn render_page(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(slug): Path<String>,
) -> Result<Html<String>, StatusCode> {
    let page = match a003_storefront_page::service::get_by_slug(&state.conn, &slug).await {
        Ok(Some(page)) => page,
        Ok(None) => return Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load page '{}': {}", slug, e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut ctx = PageRenderContext::new(state.config.site.assets_url.clone());
    let body = match state.availability.core() {
        Some(core) => core.expand_shortcodes(&page.content, &mut ctx).await,
        None => page.content.clone(),
    };
    let assets = ctx.finish().map_err(|e| {
        tracing::error!("Failed to build page assets: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let notice = state
        .availability
        .admin_notice(viewer.is_admin())
        .unwrap_or_default();

    Ok(Html(document(&page, &notice, &body, &assets)))
}

fn document(page: &StorefrontPage, notice: &str, body: &str, assets: &PageAssets) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{head}
</head>
<body class="page page-{slug}">
{notice}
<main class="entry-content">
<h1 class="entry-title">{title}</h1>
{body}
</main>
{footer}
</body>
</html>
"#,
        title = esc_html(&page.title),
        slug = esc_attr(&page.slug),
        head = assets.head,
        notice = notice,
        body = body,
        footer = assets.footer,
    )
}
