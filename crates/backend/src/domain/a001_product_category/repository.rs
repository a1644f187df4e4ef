use chrono::Utc;
use contracts::domain::a001_product_category::aggregate::{ProductCategory, ProductCategoryId};
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_product_category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<i64>,
    pub description: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ProductCategory {
    fn from(m: Model) -> Self {
        ProductCategory {
            id: ProductCategoryId(m.id),
            name: m.name,
            slug: m.slug,
            parent_id: m.parent_id.map(ProductCategoryId),
            description: m.description,
        }
    }
}

pub async fn list_all(conn: &DatabaseConnection) -> anyhow::Result<Vec<ProductCategory>> {
    let items = Entity::find()
        .order_by_asc(Column::Name)
        .all(conn)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(
    conn: &DatabaseConnection,
    id: i64,
) -> anyhow::Result<Option<ProductCategory>> {
    let result = Entity::find_by_id(id).one(conn).await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_slug(
    conn: &DatabaseConnection,
    slug: &str,
) -> anyhow::Result<Option<ProductCategory>> {
    let result = Entity::find()
        .filter(Column::Slug.eq(slug))
        .one(conn)
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(
    conn: &DatabaseConnection,
    name: &str,
    slug: &str,
    parent_id: Option<i64>,
    description: &str,
) -> anyhow::Result<ProductCategory> {
    let now = Utc::now();
    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        name: Set(name.to_string()),
        slug: Set(slug.to_string()),
        parent_id: Set(parent_id),
        description: Set(description.to_string()),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
    };
    let model = active.insert(conn).await?;
    Ok(model.into())
}

pub async fn update(conn: &DatabaseConnection, category: &ProductCategory) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(category.id.value()),
        name: Set(category.name.clone()),
        slug: Set(category.slug.clone()),
        parent_id: Set(category.parent_id.map(|p| p.value())),
        description: Set(category.description.clone()),
        updated_at: Set(Some(Utc::now())),
        created_at: sea_orm::ActiveValue::NotSet,
    };
    active.update(conn).await?;
    Ok(())
}

pub async fn delete(conn: &DatabaseConnection, id: i64) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id).exec(conn).await?;
    Ok(result.rows_affected > 0)
}
