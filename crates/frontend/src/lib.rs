//! Browser side of the category slider, loaded as one wasm module.
//!
//! Storefront pages declare `var swiper_configs = [{ id: "…" }, …]` in their
//! footer before loading it; every entry becomes one Swiper instance. Admin
//! term screens get the media picker for image fields instead.

pub mod activation;
pub mod media_picker;

use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    match activation::activate_all() {
        Ok(count) => log::debug!("Activated {} category slider(s)", count),
        Err(e) => log::error!("Slider activation failed: {:?}", e),
    }

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    match media_picker::bind(&document) {
        Ok(0) => {}
        Ok(count) => log::debug!("Media picker bound to {} image field(s)", count),
        Err(e) => log::error!("Media picker setup failed: {:?}", e),
    }
}
