use contracts::domain::a003_storefront_page::aggregate::StorefrontPage;
use sea_orm::DatabaseConnection;

use super::repository;
use crate::shared::html::sanitize_page_content;

/// Сохранение страницы; контент очищается от скриптов до записи
pub async fn save(conn: &DatabaseConnection, page: StorefrontPage) -> anyhow::Result<StorefrontPage> {
    page.validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    let page = StorefrontPage {
        slug: page.slug.trim().to_string(),
        title: page.title.trim().to_string(),
        content: sanitize_page_content(&page.content),
    };
    let created = repository::upsert(conn, &page).await?;
    tracing::info!(
        "{} storefront page '{}'",
        if created { "Created" } else { "Updated" },
        page.slug
    );
    Ok(page)
}

pub async fn get_by_slug(
    conn: &DatabaseConnection,
    slug: &str,
) -> anyhow::Result<Option<StorefrontPage>> {
    repository::get_by_slug(conn, slug).await
}

pub async fn list_all(conn: &DatabaseConnection) -> anyhow::Result<Vec<StorefrontPage>> {
    repository::list_all(conn).await
}
