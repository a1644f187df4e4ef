use contracts::domain::a001_product_category::aggregate::ProductCategory;
use contracts::domain::a002_media_attachment::aggregate::ImageSize;
use contracts::shared::meta_fields::is_truthy;
use contracts::shared::slider::{parse_category_list, SliderConfig, SLIDER_IMAGE_META_KEY};

use super::page_context::PageRenderContext;
use super::shortcode::ShortcodeAttrs;
use crate::domain::a001_product_category::service::CategoryCatalog;
use crate::domain::a002_media_attachment::service::MediaLibrary;
use crate::shared::html::{esc_attr, esc_html, esc_url};
use crate::shared::term_meta::TermMetaStore;

/// Collaborators the slider reads from at render time
#[derive(Clone, Copy)]
pub struct SliderSources<'a> {
    pub catalog: &'a dyn CategoryCatalog,
    pub meta: &'a dyn TermMetaStore,
    pub media: &'a dyn MediaLibrary,
}

/// Carousel of product categories
pub struct SliderWidget {
    config: SliderConfig,
}

impl SliderWidget {
    /// Registers the activation entry and the slider assets with the page
    pub fn new(config: SliderConfig, ctx: &mut PageRenderContext) -> Self {
        ctx.register(&config);
        ctx.enqueue_slider_assets();
        Self { config }
    }

    /// `[wcs_category_slider category="1,2,3" id="home"]`
    pub fn from_attributes(attrs: &ShortcodeAttrs, ctx: &mut PageRenderContext) -> Self {
        let instance_id = attrs.get("id").filter(|id| !id.is_empty()).cloned();
        let category_ids = attrs
            .get("category")
            .map(|list| parse_category_list(list))
            .unwrap_or_default();
        Self::new(SliderConfig::new(instance_id, category_ids), ctx)
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub async fn build(&self, sources: &SliderSources<'_>) -> String {
        let mut html = format!(
            r#"<div id="{}" class="swiper-container wcs-swiper-container"><div class="swiper-wrapper">"#,
            esc_attr(&self.config.dom_id())
        );
        for &id in &self.config.category_ids {
            let Some(category) = resolve_category(sources, id).await else {
                continue;
            };
            let image = slide_image(sources, category.id.value()).await;
            html.push_str(&render_slide(
                &category,
                image.as_deref(),
                &sources.catalog.permalink(&category),
            ));
        }
        html.push_str("</div></div>");
        html
    }
}

async fn resolve_category(sources: &SliderSources<'_>, id: u64) -> Option<ProductCategory> {
    let id = i64::try_from(id).ok()?;
    match sources.catalog.get_category(id).await {
        Ok(Some(category)) => Some(category),
        Ok(None) => {
            tracing::warn!("Slider skips unknown category {}", id);
            None
        }
        Err(e) => {
            tracing::error!("Failed to load category {}: {}", id, e);
            None
        }
    }
}

/// Full-size image URL bound to the category, if any
async fn slide_image(sources: &SliderSources<'_>, term_id: i64) -> Option<String> {
    let stored = match sources.meta.get(term_id, SLIDER_IMAGE_META_KEY).await {
        Ok(value) => value?,
        Err(e) => {
            tracing::error!("Failed to read slider image of category {}: {}", term_id, e);
            return None;
        }
    };
    if !is_truthy(&stored) {
        return None;
    }
    let attachment_id = stored.trim().parse::<i64>().ok()?;
    match sources.media.attachment_url(attachment_id, ImageSize::Full).await {
        Ok(url) => url.map(|u| esc_url(&u)).filter(|u| !u.is_empty()),
        Err(e) => {
            tracing::error!("Failed to resolve attachment {}: {}", attachment_id, e);
            None
        }
    }
}

fn render_slide(category: &ProductCategory, image: Option<&str>, permalink: &str) -> String {
    let image = image
        .map(|src| format!(r#"<img src="{}">"#, src))
        .unwrap_or_default();
    format!(
        concat!(
            r#"<div class="swiper-slide"><div class="category-wrapper">"#,
            r#"<div class="category-image">{image}</div>"#,
            r#"<div class="category-text"><h3>{name}</h3>"#,
            r#"<a class="button category-button" href="{href}">Show more</a></div>"#,
            r#"</div></div>"#
        ),
        image = image,
        name = esc_html(&category.name),
        href = esc_url(permalink),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use contracts::domain::a001_product_category::aggregate::ProductCategoryId;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FakeCatalog(Vec<ProductCategory>);

    #[async_trait]
    impl CategoryCatalog for FakeCatalog {
        async fn get_category(&self, id: i64) -> anyhow::Result<Option<ProductCategory>> {
            if id == 99 {
                anyhow::bail!("catalog offline");
            }
            Ok(self.0.iter().find(|c| c.id.value() == id).cloned())
        }

        fn permalink(&self, category: &ProductCategory) -> String {
            format!("https://shop.test/product-category/{}/", category.slug)
        }
    }

    #[derive(Default)]
    struct FakeMeta(Mutex<HashMap<(i64, String), String>>);

    #[async_trait]
    impl TermMetaStore for FakeMeta {
        async fn get(&self, term_id: i64, key: &str) -> anyhow::Result<Option<String>> {
            Ok(self.0.lock().unwrap().get(&(term_id, key.to_string())).cloned())
        }
        async fn update(&self, term_id: i64, key: &str, value: &str) -> anyhow::Result<()> {
            self.0
                .lock()
                .unwrap()
                .insert((term_id, key.to_string()), value.to_string());
            Ok(())
        }
        async fn delete(&self, term_id: i64, key: &str) -> anyhow::Result<bool> {
            Ok(self.0.lock().unwrap().remove(&(term_id, key.to_string())).is_some())
        }
        async fn delete_all(&self, _term_id: i64) -> anyhow::Result<u64> {
            Ok(0)
        }
    }

    struct FakeMedia;

    #[async_trait]
    impl MediaLibrary for FakeMedia {
        async fn attachment_url(&self, id: i64, size: ImageSize) -> anyhow::Result<Option<String>> {
            assert_eq!(size, ImageSize::Full);
            Ok((id == 7).then(|| "/uploads/shoes.jpg".to_string()))
        }
    }

    fn category(id: i64, name: &str, slug: &str) -> ProductCategory {
        ProductCategory {
            id: ProductCategoryId(id),
            name: name.into(),
            slug: slug.into(),
            parent_id: None,
            description: String::new(),
        }
    }

    async fn fixture() -> (FakeCatalog, FakeMeta, FakeMedia) {
        let catalog = FakeCatalog(vec![
            category(1, "Shoes & Boots", "shoes"),
            category(2, "Hats", "hats"),
            category(3, "Bags", "bags"),
        ]);
        let meta = FakeMeta::default();
        meta.update(1, SLIDER_IMAGE_META_KEY, "7").await.unwrap();
        // attachment that does not resolve
        meta.update(3, SLIDER_IMAGE_META_KEY, "8").await.unwrap();
        (catalog, meta, FakeMedia)
    }

    #[tokio::test]
    async fn test_empty_category_list() {
        let (catalog, meta, media) = fixture().await;
        let sources = SliderSources { catalog: &catalog, meta: &meta, media: &media };
        let mut ctx = PageRenderContext::new("/assets");

        let widget = SliderWidget::new(SliderConfig::new(Some("empty".into()), vec![]), &mut ctx);
        let html = widget.build(&sources).await;

        assert_eq!(
            html,
            r#"<div id="wcs-swiper-container-empty" class="swiper-container wcs-swiper-container"><div class="swiper-wrapper"></div></div>"#
        );
        assert_eq!(ctx.activations().len(), 1);
        assert_eq!(ctx.activations()[0].dom_id, "wcs-swiper-container-empty");
    }

    #[tokio::test]
    async fn test_slides_in_order_with_skips() {
        let (catalog, meta, media) = fixture().await;
        let sources = SliderSources { catalog: &catalog, meta: &meta, media: &media };
        let mut ctx = PageRenderContext::new("/assets");
        let mut attrs = ShortcodeAttrs::new();
        attrs.insert("category".into(), "3,x,42,1,99,2".into());

        let widget = SliderWidget::from_attributes(&attrs, &mut ctx);
        let html = widget.build(&sources).await;

        assert_eq!(html.matches(r#"<div class="swiper-slide">"#).count(), 3);
        let bags = html.find("<h3>Bags</h3>").unwrap();
        let shoes = html.find("<h3>Shoes &amp; Boots</h3>").unwrap();
        let hats = html.find("<h3>Hats</h3>").unwrap();
        assert!(bags < shoes && shoes < hats);
        assert_eq!(html.matches("<img ").count(), 1);
        assert!(html.contains(r#"<img src="/uploads/shoes.jpg">"#));
        assert!(html.contains(
            r#"<a class="button category-button" href="https://shop.test/product-category/hats/">Show more</a>"#
        ));
    }

    #[tokio::test]
    async fn test_two_widgets_match_payload() {
        let (catalog, meta, media) = fixture().await;
        let sources = SliderSources { catalog: &catalog, meta: &meta, media: &media };
        let mut ctx = PageRenderContext::new("/assets");

        let first = SliderWidget::from_attributes(&ShortcodeAttrs::new(), &mut ctx);
        let second = SliderWidget::new(SliderConfig::new(Some("custom".into()), vec![2]), &mut ctx);
        let first_html = first.build(&sources).await;
        let second_html = second.build(&sources).await;

        let ids: Vec<&str> = ctx.activations().iter().map(|a| a.dom_id.as_str()).collect();
        assert_eq!(ids.len(), 2);
        assert!(first_html.starts_with(&format!(r#"<div id="{}" "#, ids[0])));
        assert!(second_html.starts_with(&format!(r#"<div id="{}" "#, ids[1])));
        assert_eq!(first.config().instance_id.len(), 13);
        assert_eq!(ctx.assets().len(), 4);
    }
}
