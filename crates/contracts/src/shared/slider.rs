//! Category slider configuration shared by the renderer and the client
//! activation script.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Term meta key holding the slider image attachment id of a category
pub const SLIDER_IMAGE_META_KEY: &str = "wcs_slider_image";

/// Prefix of the carousel root element id
pub const SLIDER_DOM_PREFIX: &str = "wcs-swiper-container-";

/// Name of the page-global array read by the activation script
pub const ACTIVATION_GLOBAL: &str = "swiper_configs";

/// Length of generated instance ids (same as a `uniqid()` token)
const GENERATED_ID_LEN: usize = 13;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderConfig {
    #[serde(rename = "instanceId")]
    pub instance_id: String,
    #[serde(rename = "categoryIds")]
    pub category_ids: Vec<u64>,
}

impl SliderConfig {
    /// `instance_id` falls back to a freshly generated token
    pub fn new(instance_id: Option<String>, category_ids: Vec<u64>) -> Self {
        Self {
            instance_id: instance_id.unwrap_or_else(generate_instance_id),
            category_ids,
        }
    }

    /// Id of the rendered carousel root
    pub fn dom_id(&self) -> String {
        format!("{}{}", SLIDER_DOM_PREFIX, self.instance_id)
    }

    pub fn activation_entry(&self) -> ActivationEntry {
        ActivationEntry {
            dom_id: self.dom_id(),
        }
    }
}

pub fn generate_instance_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(GENERATED_ID_LEN);
    id
}

/// One element of the activation payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationEntry {
    #[serde(rename = "id")]
    pub dom_id: String,
}

/// Parses a comma separated list of category ids.
///
/// Tokens that are not non-negative integers are dropped; order is kept.
/// Leading zeros (other than `"0"` itself) are rejected, as are empty tokens.
pub fn parse_category_list(input: &str) -> Vec<u64> {
    input.split(',').filter_map(parse_non_negative).collect()
}

fn parse_non_negative(token: &str) -> Option<u64> {
    let token = token.trim();
    let (negative, digits) = match token.as_bytes().first()? {
        b'+' => (false, &token[1..]),
        b'-' => (true, &token[1..]),
        _ => (false, token),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    let value = digits.parse::<i64>().ok()?;
    if negative && value != 0 {
        return None;
    }
    u64::try_from(value).ok()
}

// ============================================================================
// Client carousel options
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwiperOptions {
    pub space_between: u32,
    pub centered_slides: bool,
    pub slides_per_view: String,
    pub navigation: SwiperNavigation,
    pub free_mode: SwiperFreeMode,
    pub mousewheel: SwiperMousewheel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwiperNavigation {
    pub next_el: String,
    pub prev_el: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwiperFreeMode {
    pub enabled: bool,
    pub sticky: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwiperMousewheel {
    pub enabled: bool,
    pub force_to_axis: bool,
}

impl Default for SwiperOptions {
    /// Centered auto-width slides, sticky free scrolling, axis-locked wheel
    fn default() -> Self {
        Self {
            space_between: 20,
            centered_slides: true,
            slides_per_view: "auto".to_string(),
            navigation: SwiperNavigation {
                next_el: ".swiper-button-next".to_string(),
                prev_el: ".swiper-button-prev".to_string(),
            },
            free_mode: SwiperFreeMode {
                enabled: true,
                sticky: true,
            },
            mousewheel: SwiperMousewheel {
                enabled: true,
                force_to_axis: true,
            },
        }
    }
}
