use std::collections::HashMap;

use contracts::shared::meta_fields::{normalize_submission, FieldSet};
use thiserror::Error;

use super::nonce::NonceService;
use super::store::TermMetaStore;

#[derive(Debug, Error)]
pub enum MetaError {
    /// Nonce missing or not valid for this form; nothing was written
    #[error("meta form nonce is missing or invalid")]
    Authorization,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Request-level facts the persister needs besides the form body
#[derive(Debug, Clone, Default)]
pub struct SaveContext {
    pub user_id: String,
    pub nonce: Option<String>,
    /// Background autosave; meta is never persisted on autosave
    pub autosave: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveReport {
    pub entity_id: i64,
    pub writes: usize,
    pub deletes: usize,
}

impl SaveReport {
    fn untouched(entity_id: i64) -> Self {
        Self {
            entity_id,
            writes: 0,
            deletes: 0,
        }
    }
}

/// Validates a submitted meta form and applies it to the store.
///
/// Per field: a non-empty value is written when it differs from the stored
/// one; an empty required field falls back to its default; an empty optional
/// field deletes the stored value. Writes are independent single-key
/// upserts, so a store failure midway leaves earlier fields written.
pub struct MetaPersister<'a> {
    pub fields: &'a FieldSet,
    pub nonces: &'a NonceService,
    pub nonce_action: &'a str,
    pub store: &'a dyn TermMetaStore,
}

impl MetaPersister<'_> {
    pub async fn save(
        &self,
        entity_id: i64,
        submitted: &HashMap<String, String>,
        ctx: &SaveContext,
    ) -> Result<SaveReport, MetaError> {
        let nonce_ok = ctx
            .nonce
            .as_deref()
            .is_some_and(|token| self.nonces.verify(token, self.nonce_action, &ctx.user_id));
        if !nonce_ok {
            return Err(MetaError::Authorization);
        }

        if ctx.autosave {
            tracing::debug!("Autosave for term {}, meta left untouched", entity_id);
            return Ok(SaveReport::untouched(entity_id));
        }

        let mut report = SaveReport::untouched(entity_id);
        for field in self.fields {
            let old = self.store.get(entity_id, &field.id).await?;
            let new = normalize_submission(field, submitted.get(&field.id).map(String::as_str));

            match new {
                Some(new) => {
                    if old.as_deref() != Some(new.as_str()) {
                        tracing::debug!("term {}: {} <- {:?}", entity_id, field.id, new);
                        self.store.update(entity_id, &field.id, &new).await?;
                        report.writes += 1;
                    }
                }
                None if field.required => {
                    let default = field.default_stored();
                    if old.as_deref() != Some(default.as_str()) {
                        tracing::debug!("term {}: {} reset to default", entity_id, field.id);
                        self.store.update(entity_id, &field.id, &default).await?;
                        report.writes += 1;
                    }
                }
                None => {
                    if old.as_deref().is_some_and(|o| !o.is_empty()) {
                        tracing::debug!("term {}: {} removed", entity_id, field.id);
                        self.store.delete(entity_id, &field.id).await?;
                        report.deletes += 1;
                    }
                }
            }
        }
        Ok(report)
    }
}
