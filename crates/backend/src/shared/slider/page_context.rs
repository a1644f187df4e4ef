use contracts::shared::slider::{ActivationEntry, SliderConfig, ACTIVATION_GLOBAL};

use super::assets::{slider_assets, Asset, AssetKind};

/// Page-scoped state of one render pass.
///
/// Widgets register their activation entries and assets here while the page
/// content is expanded; `finish` consumes the context and produces the head
/// and footer fragments exactly once.
#[derive(Debug, Default)]
pub struct PageRenderContext {
    assets_url: String,
    activations: Vec<ActivationEntry>,
    assets: Vec<Asset>,
}

/// Markup flushed at the end of the render pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageAssets {
    pub head: String,
    pub footer: String,
}

impl PageRenderContext {
    pub fn new(assets_url: impl Into<String>) -> Self {
        Self {
            assets_url: assets_url.into(),
            ..Self::default()
        }
    }

    pub fn register(&mut self, config: &SliderConfig) {
        self.activations.push(config.activation_entry());
    }

    /// Adds an asset unless one with the same handle and kind is queued
    pub fn enqueue(&mut self, asset: Asset) {
        let queued = self
            .assets
            .iter()
            .any(|a| a.handle == asset.handle && a.kind == asset.kind);
        if !queued {
            self.assets.push(asset);
        }
    }

    pub fn enqueue_slider_assets(&mut self) {
        for asset in slider_assets(&self.assets_url) {
            self.enqueue(asset);
        }
    }

    pub fn activations(&self) -> &[ActivationEntry] {
        &self.activations
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn finish(self) -> anyhow::Result<PageAssets> {
        let mut head = Vec::new();
        let mut footer = Vec::new();

        for asset in self.assets.iter().filter(|a| a.kind == AssetKind::Style) {
            head.push(asset.tag());
        }
        for asset in self
            .assets
            .iter()
            .filter(|a| a.kind == AssetKind::Script && !a.in_footer)
        {
            head.push(asset.tag());
        }

        if !self.activations.is_empty() {
            footer.push(activation_payload(&self.activations)?);
            for asset in self
                .assets
                .iter()
                .filter(|a| a.kind == AssetKind::Script && a.in_footer)
            {
                footer.push(asset.tag());
            }
        }

        Ok(PageAssets {
            head: head.join("\n"),
            footer: footer.join("\n"),
        })
    }
}

/// Inline script declaring the activation global
fn activation_payload(entries: &[ActivationEntry]) -> anyhow::Result<String> {
    // A literal `</` would close the script element early
    let json = serde_json::to_string(entries)?.replace("</", "<\\/");
    Ok(format!(
        "<script id=\"wcs-swiper-activation-js-extra\">\nvar {} = {};\n</script>",
        ACTIVATION_GLOBAL, json
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page_has_no_output() {
        let assets = PageRenderContext::new("/assets").finish().unwrap();
        assert_eq!(assets, PageAssets::default());
    }

    #[test]
    fn test_assets_enqueued_once() {
        let mut ctx = PageRenderContext::new("/assets");
        for _ in 0..3 {
            ctx.enqueue_slider_assets();
        }
        assert_eq!(ctx.assets().len(), 4);
    }

    #[test]
    fn test_footer_payload_precedes_scripts() {
        let mut ctx = PageRenderContext::new("/assets");
        ctx.register(&SliderConfig::new(Some("a".into()), vec![]));
        ctx.register(&SliderConfig::new(Some("b".into()), vec![1]));
        ctx.enqueue_slider_assets();
        let out = ctx.finish().unwrap();

        let payload = out
            .footer
            .find(r#"var swiper_configs = [{"id":"wcs-swiper-container-a"},{"id":"wcs-swiper-container-b"}];"#)
            .unwrap();
        let loader = out.footer.find("wcs-swiper-activation-js\"").unwrap();
        assert!(payload < loader);
        assert!(out.head.contains("swiper-overrides.css?ver=1.0"));
        assert!(out.head.contains("swiper-bundle.min.js?ver=11.1.0"));
        assert!(!out.head.contains("wcs-swiper-activation"));
    }

    #[test]
    fn test_payload_cannot_close_script() {
        let mut ctx = PageRenderContext::new("/assets");
        ctx.register(&SliderConfig::new(Some("</script>".into()), vec![]));
        let out = ctx.finish().unwrap();
        assert!(!out.footer.contains("-</script>"));
        assert!(out.footer.contains(r#"<\/script>"#));
    }
}
