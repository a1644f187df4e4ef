//! Bootstrap of the category slider feature.
//!
//! The slider only works on top of the commerce catalog. `Availability::detect`
//! runs once at startup; when the catalog is disabled no binding is created,
//! shortcodes stay unexpanded and admins get a notice instead.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::domain::a001_product_category::meta_binding::CategoryMetaBinding;
use crate::domain::a001_product_category::service::{CategoryCatalog, SqliteCategoryCatalog};
use crate::domain::a002_media_attachment::service::{MediaLibrary, SqliteMediaLibrary};
use crate::shared::config::Config;
use crate::shared::html::esc_html;
use crate::shared::slider::{
    PageRenderContext, Segment, ShortcodeParser, SliderSources, SliderWidget,
};
use crate::shared::term_meta::{NonceService, TermMetaStore};

const INACTIVE_NOTICE: &str = "Woo Category Slider requires the commerce catalog to be active. \
Please enable the commerce catalog to use Woo Category Slider.";

pub struct SliderCore {
    binding: CategoryMetaBinding,
    shortcodes: ShortcodeParser,
    catalog: Arc<dyn CategoryCatalog>,
    meta: Arc<dyn TermMetaStore>,
    media: Arc<dyn MediaLibrary>,
}

impl SliderCore {
    pub fn new(
        nonces: NonceService,
        catalog: Arc<dyn CategoryCatalog>,
        meta: Arc<dyn TermMetaStore>,
        media: Arc<dyn MediaLibrary>,
    ) -> anyhow::Result<Self> {
        let binding = CategoryMetaBinding::slider_image(nonces, meta.clone(), media.clone())?;
        Ok(Self {
            binding,
            shortcodes: ShortcodeParser::slider()?,
            catalog,
            meta,
            media,
        })
    }

    pub fn binding(&self) -> &CategoryMetaBinding {
        &self.binding
    }

    pub fn sources(&self) -> SliderSources<'_> {
        SliderSources {
            catalog: self.catalog.as_ref(),
            meta: self.meta.as_ref(),
            media: self.media.as_ref(),
        }
    }

    /// Replaces every slider shortcode in `content` with rendered markup
    pub async fn expand_shortcodes(&self, content: &str, ctx: &mut PageRenderContext) -> String {
        let sources = self.sources();
        let mut out = String::with_capacity(content.len());
        for segment in self.shortcodes.segments(content) {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Shortcode(attrs) => {
                    let widget = SliderWidget::from_attributes(&attrs, ctx);
                    out.push_str(&widget.build(&sources).await);
                }
            }
        }
        out
    }
}

#[derive(Clone)]
pub enum Availability {
    Active(Arc<SliderCore>),
    Inactive,
}

impl Availability {
    pub fn detect(
        config: &Config,
        conn: &DatabaseConnection,
        meta: Arc<dyn TermMetaStore>,
    ) -> anyhow::Result<Self> {
        if !config.commerce.enabled {
            tracing::warn!("Commerce catalog is disabled, category slider is inactive");
            return Ok(Availability::Inactive);
        }

        let nonces = NonceService::new(
            &config.security.secret,
            config.security.nonce_lifetime_hours,
        );
        let catalog = Arc::new(SqliteCategoryCatalog::new(
            conn.clone(),
            config.site.base_url.clone(),
        ));
        let media = Arc::new(SqliteMediaLibrary::new(
            conn.clone(),
            config.site.uploads_url.clone(),
        ));
        let core = SliderCore::new(nonces, catalog, meta, media)?;
        tracing::info!("Category slider active");
        Ok(Availability::Active(Arc::new(core)))
    }

    pub fn core(&self) -> Option<&SliderCore> {
        match self {
            Availability::Active(core) => Some(core),
            Availability::Inactive => None,
        }
    }

    /// Notice markup for admin viewers while the feature is inactive
    pub fn admin_notice(&self, viewer_is_admin: bool) -> Option<String> {
        match self {
            Availability::Inactive if viewer_is_admin => Some(format!(
                r#"<div class="notice notice-error"><p>{}</p></div>"#,
                esc_html(INACTIVE_NOTICE)
            )),
            _ => None,
        }
    }
}
