use serde::{Deserialize, Serialize};

crate::integer_aggregate_id!(AttachmentId);

/// Загруженный файл медиабиблиотеки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAttachment {
    pub id: AttachmentId,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "thumbFileName")]
    pub thumb_file_name: Option<String>,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    #[serde(rename = "altText")]
    pub alt_text: String,
}

impl MediaAttachment {
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// Image offered by the admin media picker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaImage {
    pub id: AttachmentId,
    #[serde(rename = "altText")]
    pub alt_text: String,
    #[serde(rename = "thumbnailUrl")]
    pub thumbnail_url: String,
}

/// Requested rendition of an image attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Thumbnail,
    Full,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MediaAttachmentDto {
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "thumbFileName")]
    pub thumb_file_name: Option<String>,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    #[serde(rename = "altText", default)]
    pub alt_text: String,
}

impl MediaAttachmentDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.file_name.trim().is_empty() {
            return Err("File name must not be empty".into());
        }
        if self.file_name.contains("..") || self.file_name.starts_with('/') {
            return Err(format!("File name '{}' must be a relative path", self.file_name));
        }
        if self.mime_type.trim().is_empty() {
            return Err("Mime type must not be empty".into());
        }
        Ok(())
    }
}
