use std::path::Path;

use crate::shared::html::{esc_attr, esc_url};

pub const SWIPER_VERSION: &str = "11.1.0";
pub const PLUGIN_ASSET_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Style,
    Script,
}

/// A stylesheet or script enqueued for the current page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub handle: &'static str,
    pub kind: AssetKind,
    pub src: String,
    pub version: &'static str,
    /// Scripts only; styles always go to the head
    pub in_footer: bool,
    /// Loaded as an ES module (the wasm loader)
    pub module: bool,
}

impl Asset {
    fn versioned_src(&self) -> String {
        format!("{}?ver={}", self.src, self.version)
    }

    /// Path below `assets_url`; `None` when the asset is served from elsewhere
    pub fn local_path(&self, assets_url: &str) -> Option<&str> {
        self.src
            .strip_prefix(assets_url.trim_end_matches('/'))?
            .strip_prefix('/')
    }

    pub fn tag(&self) -> String {
        let src = esc_url(&self.versioned_src());
        match self.kind {
            AssetKind::Style => format!(
                r#"<link rel="stylesheet" id="{}-css" href="{}" media="all" />"#,
                esc_attr(self.handle),
                src
            ),
            AssetKind::Script if self.module => format!(
                r#"<script type="module" id="{}-js">import init from "{}"; init();</script>"#,
                esc_attr(self.handle),
                src
            ),
            AssetKind::Script => format!(
                r#"<script src="{}" id="{}-js"></script>"#,
                src,
                esc_attr(self.handle)
            ),
        }
    }
}

/// Everything a page with at least one slider needs, in enqueue order
pub fn slider_assets(assets_url: &str) -> Vec<Asset> {
    let base = assets_url.trim_end_matches('/');
    vec![
        Asset {
            handle: "swiper",
            kind: AssetKind::Style,
            src: format!("{}/css/swiper-bundle.min.css", base),
            version: SWIPER_VERSION,
            in_footer: false,
            module: false,
        },
        Asset {
            handle: "swiper",
            kind: AssetKind::Script,
            src: format!("{}/js/swiper-bundle.min.js", base),
            version: SWIPER_VERSION,
            in_footer: false,
            module: false,
        },
        Asset {
            handle: "wcs-swiper-activation",
            kind: AssetKind::Script,
            src: format!("{}/pkg/frontend.js", base),
            version: PLUGIN_ASSET_VERSION,
            in_footer: true,
            module: true,
        },
        Asset {
            handle: "wcs-swiper-overrides",
            kind: AssetKind::Style,
            src: format!("{}/css/swiper-overrides.css", base),
            version: PLUGIN_ASSET_VERSION,
            in_footer: false,
            module: false,
        },
    ]
}

/// Admin term screens load the same wasm module for the media picker
pub fn admin_assets(assets_url: &str) -> Vec<Asset> {
    vec![Asset {
        handle: "wcs-media-picker",
        kind: AssetKind::Script,
        src: format!("{}/pkg/frontend.js", assets_url.trim_end_matches('/')),
        version: PLUGIN_ASSET_VERSION,
        in_footer: true,
        module: true,
    }]
}

/// Enqueued files absent from `assets_dir` (built by `scripts/build-assets.sh`)
pub fn missing_assets(assets_dir: &Path, assets_url: &str) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for asset in slider_assets(assets_url)
        .iter()
        .chain(admin_assets(assets_url).iter())
    {
        let Some(relative) = asset.local_path(assets_url) else {
            continue;
        };
        if !assets_dir.join(relative).is_file() && !missing.iter().any(|m| m == relative) {
            missing.push(relative.to_string());
        }
    }
    missing
}
