use chrono::Utc;
use contracts::domain::a002_media_attachment::aggregate::{
    AttachmentId, MediaAttachment, MediaAttachmentDto,
};
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_media_attachment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub file_name: String,
    pub thumb_file_name: Option<String>,
    pub mime_type: String,
    pub alt_text: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for MediaAttachment {
    fn from(m: Model) -> Self {
        MediaAttachment {
            id: AttachmentId(m.id),
            file_name: m.file_name,
            thumb_file_name: m.thumb_file_name,
            mime_type: m.mime_type,
            alt_text: m.alt_text,
        }
    }
}

pub async fn list_all(conn: &DatabaseConnection) -> anyhow::Result<Vec<MediaAttachment>> {
    let items = Entity::find()
        .order_by_desc(Column::Id)
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
) -> anyhow::Result<Option<MediaAttachment>> {
    let result = Entity::find_by_id(id).one(conn).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(
    conn: &DatabaseConnection,
    dto: &MediaAttachmentDto,
) -> anyhow::Result<MediaAttachment> {
    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        file_name: Set(dto.file_name.trim().to_string()),
        thumb_file_name: Set(dto
            .thumb_file_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)),
        mime_type: Set(dto.mime_type.trim().to_string()),
        alt_text: Set(dto.alt_text.clone()),
        created_at: Set(Some(Utc::now())),
    };
    let model = active.insert(conn).await?;
    Ok(model.into())
}
