use async_trait::async_trait;
use contracts::domain::a002_media_attachment::aggregate::{
    ImageSize, MediaAttachment, MediaAttachmentDto, MediaImage,
};
use sea_orm::DatabaseConnection;

use super::repository;

/// Resolves attachment ids to public image URLs
#[async_trait]
pub trait MediaLibrary: Send + Sync {
    /// `None` when the attachment does not exist or is not an image
    async fn attachment_url(&self, id: i64, size: ImageSize) -> anyhow::Result<Option<String>>;
}

#[derive(Clone)]
pub struct SqliteMediaLibrary {
    conn: DatabaseConnection,
    uploads_url: String,
}

impl SqliteMediaLibrary {
    pub fn new(conn: DatabaseConnection, uploads_url: impl Into<String>) -> Self {
        Self {
            conn,
            uploads_url: uploads_url.into(),
        }
    }
}

#[async_trait]
impl MediaLibrary for SqliteMediaLibrary {
    async fn attachment_url(&self, id: i64, size: ImageSize) -> anyhow::Result<Option<String>> {
        let attachment = repository::get_by_id(&self.conn, id).await?;
        Ok(attachment
            .filter(MediaAttachment::is_image)
            .map(|a| image_url(&self.uploads_url, &a, size)))
    }
}

/// Thumbnails fall back to the full file when none was generated
pub fn image_url(uploads_url: &str, attachment: &MediaAttachment, size: ImageSize) -> String {
    let file = match size {
        ImageSize::Thumbnail => attachment
            .thumb_file_name
            .as_deref()
            .unwrap_or(attachment.file_name.as_str()),
        ImageSize::Full => attachment.file_name.as_str(),
    };
    let encoded: Vec<String> = file
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("{}/{}", uploads_url.trim_end_matches('/'), encoded.join("/"))
}

/// Регистрация загруженного файла
pub async fn create(
    conn: &DatabaseConnection,
    dto: MediaAttachmentDto,
) -> anyhow::Result<MediaAttachment> {
    dto.validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    let attachment = repository::insert(conn, &dto).await?;
    tracing::info!("Registered attachment {} ({})", attachment.id, attachment.file_name);
    Ok(attachment)
}

pub async fn get_by_id(
    conn: &DatabaseConnection,
    id: i64,
) -> anyhow::Result<Option<MediaAttachment>> {
    repository::get_by_id(conn, id).await
}

pub async fn list_all(conn: &DatabaseConnection) -> anyhow::Result<Vec<MediaAttachment>> {
    repository::list_all(conn).await
}

/// Image attachments with thumbnail URLs, for the admin picker
pub async fn list_images(
    conn: &DatabaseConnection,
    uploads_url: &str,
) -> anyhow::Result<Vec<MediaImage>> {
    Ok(repository::list_all(conn)
        .await?
        .into_iter()
        .filter(MediaAttachment::is_image)
        .map(|a| MediaImage {
            thumbnail_url: image_url(uploads_url, &a, ImageSize::Thumbnail),
            id: a.id,
            alt_text: a.alt_text,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;

    fn dto(file: &str, thumb: Option<&str>, mime: &str) -> MediaAttachmentDto {
        MediaAttachmentDto {
            file_name: file.into(),
            thumb_file_name: thumb.map(Into::into),
            mime_type: mime.into(),
            alt_text: String::new(),
        }
    }

    #[tokio::test]
    async fn test_attachment_urls() {
        let conn = connect_in_memory().await.unwrap();
        let with_thumb = create(&conn, dto("2024/05/shoes.jpg", Some("2024/05/shoes-150x150.jpg"), "image/jpeg"))
            .await
            .unwrap();
        let without_thumb = create(&conn, dto("boots big.png", None, "image/png")).await.unwrap();
        let pdf = create(&conn, dto("manual.pdf", None, "application/pdf")).await.unwrap();

        let media = SqliteMediaLibrary::new(conn, "https://shop.test/uploads/");
        assert_eq!(
            media.attachment_url(with_thumb.id.value(), ImageSize::Thumbnail).await.unwrap(),
            Some("https://shop.test/uploads/2024/05/shoes-150x150.jpg".into())
        );
        assert_eq!(
            media.attachment_url(with_thumb.id.value(), ImageSize::Full).await.unwrap(),
            Some("https://shop.test/uploads/2024/05/shoes.jpg".into())
        );
        assert_eq!(
            media.attachment_url(without_thumb.id.value(), ImageSize::Thumbnail).await.unwrap(),
            Some("https://shop.test/uploads/boots%20big.png".into())
        );
        assert_eq!(media.attachment_url(pdf.id.value(), ImageSize::Full).await.unwrap(), None);
        assert_eq!(media.attachment_url(9999, ImageSize::Full).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_images_skips_other_files() {
        let conn = connect_in_memory().await.unwrap();
        let image = create(&conn, dto("a.jpg", Some("a-150x150.jpg"), "image/jpeg")).await.unwrap();
        create(&conn, dto("manual.pdf", None, "application/pdf")).await.unwrap();

        let images = list_images(&conn, "/uploads").await.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].id, image.id);
        assert_eq!(images[0].thumbnail_url, "/uploads/a-150x150.jpg");
    }

    #[tokio::test]
    async fn test_create_rejects_path_traversal() {
        let conn = connect_in_memory().await.unwrap();
        assert!(create(&conn, dto("../etc/passwd", None, "image/png")).await.is_err());
    }
}
