use chrono::Utc;
use contracts::domain::a003_storefront_page::aggregate::StorefrontPage;
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_storefront_page")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub slug: String,
    pub title: String,
    pub content: String,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for StorefrontPage {
    fn from(m: Model) -> Self {
        StorefrontPage {
            slug: m.slug,
            title: m.title,
            content: m.content,
        }
    }
}

pub async fn list_all(conn: &DatabaseConnection) -> anyhow::Result<Vec<StorefrontPage>> {
    let items = Entity::find()
        .order_by_asc(Column::Slug)
        .all(conn)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_slug(
    conn: &DatabaseConnection,
    slug: &str,
) -> anyhow::Result<Option<StorefrontPage>> {
    let result = Entity::find_by_id(slug.to_string()).one(conn).await?;
    Ok(result.map(Into::into))
}

/// Insert or replace by slug; returns `true` when a new row was created
pub async fn upsert(conn: &DatabaseConnection, page: &StorefrontPage) -> anyhow::Result<bool> {
    let existing = Entity::find_by_id(page.slug.clone()).one(conn).await?;
    let active = ActiveModel {
        slug: Set(page.slug.clone()),
        title: Set(page.title.clone()),
        content: Set(page.content.clone()),
        updated_at: Set(Some(Utc::now())),
    };
    match existing {
        Some(_) => {
            active.update(conn).await?;
            Ok(false)
        }
        None => {
            active.insert(conn).await?;
            Ok(true)
        }
    }
}
