use contracts::shared::slider::{ActivationEntry, SwiperOptions, ACTIVATION_GLOBAL};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Swiper 11 bundle, loaded as a classic script before this module
    type Swiper;

    #[wasm_bindgen(constructor)]
    fn new(selector: &str, options: &JsValue) -> Swiper;
}

/// Creates one Swiper per entry of the page's activation global.
///
/// A page without sliders has no global; that is not an error.
pub fn activate_all() -> Result<usize, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let raw = js_sys::Reflect::get(&window, &JsValue::from_str(ACTIVATION_GLOBAL))?;
    if raw.is_undefined() || raw.is_null() {
        return Ok(0);
    }

    let entries: Vec<ActivationEntry> = serde_wasm_bindgen::from_value(raw)?;
    let options = SwiperOptions::default()
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())?;

    let selectors = selectors(&entries);
    for selector in &selectors {
        Swiper::new(selector, &options);
    }
    Ok(selectors.len())
}

/// CSS selectors of the carousel roots, in page order
pub fn selectors(entries: &[ActivationEntry]) -> Vec<String> {
    entries.iter().map(|e| format!("#{}", e.dom_id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectors_follow_payload_order() {
        let payload = r#"[{"id":"wcs-swiper-container-top"},{"id":"wcs-swiper-container-5f3a9c1e2b7d4"}]"#;
        let entries: Vec<ActivationEntry> = serde_json::from_str(payload).unwrap();
        assert_eq!(
            selectors(&entries),
            vec![
                "#wcs-swiper-container-top".to_string(),
                "#wcs-swiper-container-5f3a9c1e2b7d4".to_string()
            ]
        );
    }

    #[test]
    fn test_empty_payload() {
        assert!(selectors(&[]).is_empty());
    }
}
