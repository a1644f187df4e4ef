use serde::{Deserialize, Serialize};

/// Страница витрины; `content` may contain shortcodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontPage {
    pub slug: String,
    pub title: String,
    pub content: String,
}

impl StorefrontPage {
    pub fn validate(&self) -> Result<(), String> {
        if self.slug.trim().is_empty() {
            return Err("Slug must not be empty".into());
        }
        if self.title.trim().is_empty() {
            return Err("Title must not be empty".into());
        }
        Ok(())
    }
}
