use std::collections::HashMap;
use std::sync::Arc;

use contracts::domain::a001_product_category::aggregate::PRODUCT_CATEGORY_TAXONOMY;
use contracts::domain::a002_media_attachment::aggregate::ImageSize;
use contracts::shared::meta_fields::{FieldKind, FieldSchema, FieldSet, FieldSetError};
use contracts::shared::slider::SLIDER_IMAGE_META_KEY;

use crate::domain::a002_media_attachment::service::MediaLibrary;
use crate::shared::term_meta::{
    ExistingValues, MetaError, MetaFormRenderer, MetaPersister, NonceField, NonceService,
    SaveContext, SaveReport, TermMetaStore,
};

/// Meta fields attached to one taxonomy.
///
/// The admin screens call `on_create_form` / `on_edit_form` while rendering
/// the term form and `on_save` after the term itself was created or updated.
pub struct CategoryMetaBinding {
    taxonomy: String,
    fields: FieldSet,
    nonces: NonceService,
    store: Arc<dyn TermMetaStore>,
    media: Arc<dyn MediaLibrary>,
}

impl CategoryMetaBinding {
    pub fn new(
        taxonomy: impl Into<String>,
        fields: FieldSet,
        nonces: NonceService,
        store: Arc<dyn TermMetaStore>,
        media: Arc<dyn MediaLibrary>,
    ) -> Self {
        Self {
            taxonomy: taxonomy.into(),
            fields,
            nonces,
            store,
            media,
        }
    }

    /// The slider image field on product categories
    pub fn slider_image(
        nonces: NonceService,
        store: Arc<dyn TermMetaStore>,
        media: Arc<dyn MediaLibrary>,
    ) -> Result<Self, FieldSetError> {
        let fields = FieldSet::new(vec![FieldSchema::image(SLIDER_IMAGE_META_KEY, "Slider Image")
            .description("Slider image for the category")])?;
        Ok(Self::new(PRODUCT_CATEGORY_TAXONOMY, fields, nonces, store, media))
    }

    pub fn taxonomy(&self) -> &str {
        &self.taxonomy
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Form field carrying the nonce
    pub fn nonce_name(&self) -> String {
        format!("{}_nonce", self.taxonomy)
    }

    fn nonce_action(&self) -> String {
        format!("term_meta:{}", self.taxonomy)
    }

    fn nonce_field(&self, user_id: &str) -> NonceField {
        NonceField {
            name: self.nonce_name(),
            token: self.nonces.create(&self.nonce_action(), user_id),
        }
    }

    /// Empty controls for the "add term" screen
    pub fn on_create_form(&self, user_id: &str) -> String {
        MetaFormRenderer::render(&self.fields, None, &self.nonce_field(user_id))
    }

    /// Controls pre-filled from the stored meta of `term_id`
    pub async fn on_edit_form(&self, term_id: i64, user_id: &str) -> anyhow::Result<String> {
        let mut existing = ExistingValues::default();
        for field in &self.fields {
            let Some(value) = self.store.get(term_id, &field.id).await? else {
                continue;
            };
            if matches!(field.kind, FieldKind::Image) {
                if let Some(url) = self.thumbnail(&value).await {
                    existing.thumbnails.insert(field.id.clone(), url);
                }
            }
            existing.values.insert(field.id.clone(), value);
        }
        Ok(MetaFormRenderer::render(
            &self.fields,
            Some(&existing),
            &self.nonce_field(user_id),
        ))
    }

    /// Builds the save context from a submitted form
    pub fn save_context(
        &self,
        submitted: &HashMap<String, String>,
        user_id: &str,
        autosave: bool,
    ) -> SaveContext {
        SaveContext {
            user_id: user_id.to_string(),
            nonce: submitted.get(&self.nonce_name()).cloned(),
            autosave,
        }
    }

    /// Persists submitted meta; saves for other taxonomies are ignored
    pub async fn on_save(
        &self,
        term_id: i64,
        taxonomy: &str,
        submitted: &HashMap<String, String>,
        ctx: &SaveContext,
    ) -> Result<SaveReport, MetaError> {
        if taxonomy != self.taxonomy {
            return Ok(SaveReport {
                entity_id: term_id,
                writes: 0,
                deletes: 0,
            });
        }
        let action = self.nonce_action();
        let persister = MetaPersister {
            fields: &self.fields,
            nonces: &self.nonces,
            nonce_action: &action,
            store: self.store.as_ref(),
        };
        persister.save(term_id, submitted, ctx).await
    }

    async fn thumbnail(&self, value: &str) -> Option<String> {
        let id = value.trim().parse::<i64>().ok()?;
        match self.media.attachment_url(id, ImageSize::Thumbnail).await {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Failed to resolve thumbnail for attachment {}: {}", id, e);
                None
            }
        }
    }
}
