use async_trait::async_trait;
use contracts::domain::a001_product_category::aggregate::{
    ProductCategory, ProductCategoryDto, ProductCategoryId,
};
use sea_orm::DatabaseConnection;

use super::repository;
use crate::shared::term_meta::TermMetaStore;

/// Read access to the product catalog taxonomy
#[async_trait]
pub trait CategoryCatalog: Send + Sync {
    async fn get_category(&self, id: i64) -> anyhow::Result<Option<ProductCategory>>;

    /// Public URL of the category archive page
    fn permalink(&self, category: &ProductCategory) -> String;
}

#[derive(Clone)]
pub struct SqliteCategoryCatalog {
    conn: DatabaseConnection,
    base_url: String,
}

impl SqliteCategoryCatalog {
    pub fn new(conn: DatabaseConnection, base_url: impl Into<String>) -> Self {
        Self {
            conn,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CategoryCatalog for SqliteCategoryCatalog {
    async fn get_category(&self, id: i64) -> anyhow::Result<Option<ProductCategory>> {
        repository::get_by_id(&self.conn, id).await
    }

    fn permalink(&self, category: &ProductCategory) -> String {
        category_permalink(&self.base_url, &category.slug)
    }
}

pub fn category_permalink(base_url: &str, slug: &str) -> String {
    format!(
        "{}/product-category/{}/",
        base_url.trim_end_matches('/'),
        urlencoding::encode(slug)
    )
}

/// Создание новой категории
pub async fn create(
    conn: &DatabaseConnection,
    dto: ProductCategoryDto,
) -> anyhow::Result<ProductCategory> {
    let slug = dto.effective_slug();
    let draft = ProductCategory {
        id: ProductCategoryId(0),
        name: dto.name.trim().to_string(),
        slug,
        parent_id: None,
        description: dto.description.clone(),
    };

    // Валидация
    draft
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    ensure_slug_free(conn, &draft.slug, None).await?;
    let parent_id = checked_parent(conn, dto.parent_id, None).await?;

    let created =
        repository::insert(conn, &draft.name, &draft.slug, parent_id, &draft.description).await?;
    tracing::info!("Created product category {} ({})", created.id, created.slug);
    Ok(created)
}

/// Обновление существующей категории
pub async fn update(
    conn: &DatabaseConnection,
    id: i64,
    dto: ProductCategoryDto,
) -> anyhow::Result<ProductCategory> {
    let mut category = repository::get_by_id(conn, id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    category.name = dto.name.trim().to_string();
    category.slug = dto.effective_slug();
    category.description = dto.description.clone();

    category
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    ensure_slug_free(conn, &category.slug, Some(id)).await?;
    category.parent_id = checked_parent(conn, dto.parent_id, Some(id))
        .await?
        .map(ProductCategoryId);

    repository::update(conn, &category).await?;
    Ok(category)
}

/// Удаление категории вместе с её метаданными
pub async fn delete(
    conn: &DatabaseConnection,
    meta: &dyn TermMetaStore,
    id: i64,
) -> anyhow::Result<bool> {
    let deleted = repository::delete(conn, id).await?;
    if deleted {
        let removed = meta.delete_all(id).await?;
        tracing::info!("Deleted product category {} and {} meta rows", id, removed);
    }
    Ok(deleted)
}

pub async fn get_by_id(
    conn: &DatabaseConnection,
    id: i64,
) -> anyhow::Result<Option<ProductCategory>> {
    repository::get_by_id(conn, id).await
}

pub async fn list_all(conn: &DatabaseConnection) -> anyhow::Result<Vec<ProductCategory>> {
    repository::list_all(conn).await
}

async fn ensure_slug_free(
    conn: &DatabaseConnection,
    slug: &str,
    own_id: Option<i64>,
) -> anyhow::Result<()> {
    if let Some(existing) = repository::get_by_slug(conn, slug).await? {
        if Some(existing.id.value()) != own_id {
            anyhow::bail!("Validation failed: slug '{}' is already in use", slug);
        }
    }
    Ok(())
}

async fn checked_parent(
    conn: &DatabaseConnection,
    parent_id: Option<i64>,
    own_id: Option<i64>,
) -> anyhow::Result<Option<i64>> {
    let Some(parent_id) = parent_id else {
        return Ok(None);
    };
    if Some(parent_id) == own_id {
        anyhow::bail!("Validation failed: a category cannot be its own parent");
    }
    if repository::get_by_id(conn, parent_id).await?.is_none() {
        anyhow::bail!("Validation failed: parent category {} does not exist", parent_id);
    }
    Ok(Some(parent_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;
    use crate::shared::term_meta::SqliteTermMetaStore;

    fn dto(name: &str) -> ProductCategoryDto {
        ProductCategoryDto {
            name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_permalink_encodes_slug() {
        assert_eq!(
            category_permalink("https://shop.test/", "garden-tools"),
            "https://shop.test/product-category/garden-tools/"
        );
        assert_eq!(
            category_permalink("https://shop.test", "кухня"),
            "https://shop.test/product-category/%D0%BA%D1%83%D1%85%D0%BD%D1%8F/"
        );
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let conn = connect_in_memory().await.unwrap();
        let meta = SqliteTermMetaStore::new(conn.clone());

        let garden = create(&conn, dto("Garden Tools")).await.unwrap();
        assert_eq!(garden.slug, "garden-tools");

        let mut child = dto("Shovels");
        child.parent_id = Some(garden.id.value());
        let shovels = create(&conn, child).await.unwrap();
        assert_eq!(shovels.parent_id, Some(garden.id));

        let renamed = update(&conn, shovels.id.value(), dto("Spades")).await.unwrap();
        assert_eq!(renamed.slug, "spades");
        assert_eq!(renamed.parent_id, None);

        meta.update(garden.id.value(), "wcs_slider_image", "3").await.unwrap();
        assert!(delete(&conn, &meta, garden.id.value()).await.unwrap());
        assert_eq!(meta.get(garden.id.value(), "wcs_slider_image").await.unwrap(), None);
        assert!(!delete(&conn, &meta, garden.id.value()).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_slug_and_missing_parent_are_rejected() {
        let conn = connect_in_memory().await.unwrap();
        create(&conn, dto("Shoes")).await.unwrap();
        assert!(create(&conn, dto("shoes")).await.is_err());

        let mut orphan = dto("Boots");
        orphan.parent_id = Some(999);
        assert!(create(&conn, orphan).await.is_err());
    }

    #[tokio::test]
    async fn test_catalog_resolves_existing_ids_only() {
        let conn = connect_in_memory().await.unwrap();
        let shoes = create(&conn, dto("Shoes")).await.unwrap();
        let catalog = SqliteCategoryCatalog::new(conn, "https://shop.test");

        let found = catalog.get_category(shoes.id.value()).await.unwrap().unwrap();
        assert_eq!(found.name, "Shoes");
        assert_eq!(catalog.permalink(&found), "https://shop.test/product-category/shoes/");
        assert!(catalog.get_category(404).await.unwrap().is_none());
    }
}
