pub mod assets;
pub mod page_context;
pub mod shortcode;
pub mod widget;

pub use assets::{admin_assets, missing_assets, Asset, AssetKind};
pub use page_context::{PageAssets, PageRenderContext};
pub use shortcode::{Segment, ShortcodeAttrs, ShortcodeParser, SLIDER_SHORTCODE};
pub use widget::{SliderSources, SliderWidget};
