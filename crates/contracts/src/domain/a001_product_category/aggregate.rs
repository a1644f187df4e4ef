use serde::{Deserialize, Serialize};

crate::integer_aggregate_id!(ProductCategoryId);

/// Taxonomy key under which product categories and their meta live
pub const PRODUCT_CATEGORY_TAXONOMY: &str = "product_cat";

/// Категория товаров (узел таксономии каталога)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCategory {
    pub id: ProductCategoryId,
    pub name: String,
    pub slug: String,
    #[serde(rename = "parentId")]
    pub parent_id: Option<ProductCategoryId>,
    pub description: String,
}

impl ProductCategory {
    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        validate_name_and_slug(&self.name, &self.slug)
    }
}

/// DTO для создания/обновления категории
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductCategoryDto {
    pub id: Option<i64>,
    pub name: String,
    /// Derived from the name when empty
    pub slug: Option<String>,
    #[serde(rename = "parentId")]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub description: String,
}

impl ProductCategoryDto {
    /// Slug to store: the explicit one, or one derived from the name
    pub fn effective_slug(&self) -> String {
        match self.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slugify(slug),
            _ => slugify(&self.name),
        }
    }
}

fn validate_name_and_slug(name: &str, slug: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name must not be empty".into());
    }
    if slug.is_empty() {
        return Err("Slug must not be empty".into());
    }
    if !slug
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(format!("Slug '{}' contains invalid characters", slug));
    }
    Ok(())
}

/// Lowercases and collapses everything that is not alphanumeric into single dashes.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for ch in input.trim().chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() || ch == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }
    slug
}
