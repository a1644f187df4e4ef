//! Media picker for image meta fields on the admin term screens.
//!
//! Per image field `F` the form renders the preview `#wcs_F img`, the hidden
//! input `#F` and the `wcs_upload_image_button_F` / `wcs_remove_image_button_F`
//! buttons. One delegated click listener on the document drives all of them.

use contracts::domain::a002_media_attachment::aggregate::MediaImage;
use gloo_net::http::Request;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, HtmlInputElement, MouseEvent};

const IMAGES_URL: &str = "/api/media/images";
const UPLOAD_PREFIX: &str = "wcs_upload_image_button_";
const REMOVE_PREFIX: &str = "wcs_remove_image_button_";
const CHOICE_CLASS: &str = "wcs-media-choice";
const CANCEL_CLASS: &str = "wcs-media-cancel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChosenImage {
    pub id: i64,
    pub src: String,
}

impl From<&MediaImage> for ChosenImage {
    fn from(image: &MediaImage) -> Self {
        Self {
            id: image.id.value(),
            src: image.thumbnail_url.clone(),
        }
    }
}

/// What a click inside the form asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction {
    Open { field: String },
    Remove { field: String },
    Choose { field: String, image: ChosenImage },
    Cancel { field: String },
}

/// Recognizes picker buttons by class; `data` reads the button's `data-*` attributes
pub fn classify(class_name: &str, data: impl Fn(&str) -> Option<String>) -> Option<PickerAction> {
    for class in class_name.split_whitespace() {
        if let Some(field) = class.strip_prefix(UPLOAD_PREFIX).filter(|f| !f.is_empty()) {
            return Some(PickerAction::Open {
                field: field.to_string(),
            });
        }
        if let Some(field) = class.strip_prefix(REMOVE_PREFIX).filter(|f| !f.is_empty()) {
            return Some(PickerAction::Remove {
                field: field.to_string(),
            });
        }
        if class == CHOICE_CLASS {
            let image = ChosenImage {
                id: data("id")?.parse().ok().filter(|id: &i64| *id > 0)?,
                src: data("src")?,
            };
            return Some(PickerAction::Choose {
                field: data("field")?,
                image,
            });
        }
        if class == CANCEL_CLASS {
            return Some(PickerAction::Cancel { field: data("field")? });
        }
    }
    None
}

/// Target state of one image control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageControl {
    pub value: String,
    pub preview_src: String,
    pub preview_visible: bool,
    pub remove_visible: bool,
}

impl ImageControl {
    pub fn chosen(image: &ChosenImage) -> Self {
        Self {
            value: image.id.to_string(),
            preview_src: image.src.clone(),
            preview_visible: true,
            remove_visible: true,
        }
    }

    pub fn cleared() -> Self {
        Self {
            value: String::new(),
            preview_src: String::new(),
            preview_visible: false,
            remove_visible: false,
        }
    }
}

/// Installs the click listener when the page has image controls.
/// Returns the number of upload buttons found.
pub fn bind(document: &Document) -> Result<u32, JsValue> {
    let count = document
        .query_selector_all(&format!(r#"[class*="{}"]"#, UPLOAD_PREFIX))?
        .length();
    if count == 0 {
        return Ok(0);
    }

    let doc = document.clone();
    let on_click = Closure::wrap(Box::new(move |e: MouseEvent| {
        let Some(target) = e.target() else { return };
        let Ok(element) = target.dyn_into::<Element>() else {
            return;
        };
        let Ok(Some(button)) = element.closest("button") else {
            return;
        };
        let action = classify(&button.class_name(), |name| {
            button.get_attribute(&format!("data-{}", name))
        });
        let Some(action) = action else { return };

        e.prevent_default();
        if let Err(err) = perform(&doc, action) {
            log::error!("Media picker failed: {:?}", err);
        }
    }) as Box<dyn FnMut(MouseEvent)>);

    document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    // lives as long as the page
    on_click.forget();
    Ok(count)
}

fn perform(document: &Document, action: PickerAction) -> Result<(), JsValue> {
    match action {
        PickerAction::Open { field } => {
            let doc = document.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match fetch_images().await {
                    Ok(images) => {
                        if let Err(err) = open_picker(&doc, &field, &images) {
                            log::error!("Cannot show media picker: {:?}", err);
                        }
                    }
                    Err(e) => log::error!("Cannot load media library: {}", e),
                }
            });
            Ok(())
        }
        PickerAction::Remove { field } => apply(document, &field, &ImageControl::cleared()),
        PickerAction::Choose { field, image } => {
            apply(document, &field, &ImageControl::chosen(&image))?;
            close_picker(document, &field)
        }
        PickerAction::Cancel { field } => close_picker(document, &field),
    }
}

async fn fetch_images() -> Result<Vec<MediaImage>, String> {
    let response = Request::get(IMAGES_URL)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err(format!("{} returned HTTP {}", IMAGES_URL, response.status()));
    }
    response.json().await.map_err(|e| e.to_string())
}

fn picker_id(field: &str) -> String {
    format!("wcs-media-picker-{}", field)
}

fn open_picker(document: &Document, field: &str, images: &[MediaImage]) -> Result<(), JsValue> {
    close_picker(document, field)?;
    let preview = document
        .get_element_by_id(&format!("wcs_{}", field))
        .ok_or_else(|| JsValue::from_str("image preview not found"))?;
    let cell = preview
        .parent_element()
        .ok_or_else(|| JsValue::from_str("image preview is detached"))?;

    let panel = document.create_element("div")?;
    panel.set_id(&picker_id(field));
    panel.set_class_name("wcs-media-picker");

    if images.is_empty() {
        let note = document.create_element("p")?;
        note.set_text_content(Some("The media library has no images."));
        panel.append_child(&note)?;
    }
    for image in images {
        let chosen = ChosenImage::from(image);
        let choice = document.create_element("button")?;
        choice.set_attribute("type", "button")?;
        choice.set_class_name(CHOICE_CLASS);
        choice.set_attribute("data-field", field)?;
        choice.set_attribute("data-id", &chosen.id.to_string())?;
        choice.set_attribute("data-src", &chosen.src)?;

        let img = document.create_element("img")?;
        img.set_attribute("src", &chosen.src)?;
        img.set_attribute("alt", &image.alt_text)?;
        img.set_attribute("width", "60")?;
        img.set_attribute("height", "60")?;
        choice.append_child(&img)?;
        panel.append_child(&choice)?;
    }

    let cancel = document.create_element("button")?;
    cancel.set_attribute("type", "button")?;
    cancel.set_class_name(&format!("{} button", CANCEL_CLASS));
    cancel.set_attribute("data-field", field)?;
    cancel.set_text_content(Some("Cancel"));
    panel.append_child(&cancel)?;

    cell.append_child(&panel)?;
    Ok(())
}

fn close_picker(document: &Document, field: &str) -> Result<(), JsValue> {
    if let Some(panel) = document.get_element_by_id(&picker_id(field)) {
        panel.remove();
    }
    Ok(())
}

fn apply(document: &Document, field: &str, control: &ImageControl) -> Result<(), JsValue> {
    let input = document
        .get_element_by_id(field)
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
        .ok_or_else(|| JsValue::from_str("hidden input not found"))?;
    input.set_value(&control.value);

    let preview = match document.get_element_by_id(&format!("wcs_{}", field)) {
        Some(container) => container.query_selector("img")?,
        None => None,
    };
    if let Some(img) = preview.and_then(|e| e.dyn_into::<HtmlImageElement>().ok()) {
        img.set_src(&control.preview_src);
        let display = if control.preview_visible { "block" } else { "none" };
        img.style().set_property("display", display)?;
    }

    let remove = document.query_selector(&format!(".{}{}", REMOVE_PREFIX, field))?;
    if let Some(button) = remove.and_then(|e| e.dyn_into::<HtmlElement>().ok()) {
        button.set_hidden(!control.remove_visible);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn attrs(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_form_buttons() {
        assert_eq!(
            classify("wcs_upload_image_button_wcs_slider_image button", attrs(&[])),
            Some(PickerAction::Open {
                field: "wcs_slider_image".into()
            })
        );
        assert_eq!(
            classify("button wcs_remove_image_button_wcs_slider_image", attrs(&[])),
            Some(PickerAction::Remove {
                field: "wcs_slider_image".into()
            })
        );
        assert_eq!(classify("button button-primary", attrs(&[])), None);
        assert_eq!(classify("wcs_upload_image_button_ button", attrs(&[])), None);
    }

    #[test]
    fn test_choice_carries_id_and_preview() {
        let data = attrs(&[
            ("field", "wcs_slider_image"),
            ("id", "42"),
            ("src", "/uploads/a-150x150.jpg"),
        ]);
        assert_eq!(
            classify(CHOICE_CLASS, data),
            Some(PickerAction::Choose {
                field: "wcs_slider_image".into(),
                image: ChosenImage {
                    id: 42,
                    src: "/uploads/a-150x150.jpg".into()
                },
            })
        );

        let broken = attrs(&[("field", "f"), ("id", "abc"), ("src", "/x.jpg")]);
        assert_eq!(classify(CHOICE_CLASS, broken), None);
    }

    #[test]
    fn test_choose_then_remove_swaps_control_state() {
        let images: Vec<MediaImage> = serde_json::from_str(
            r#"[{"id":7,"altText":"Shoes","thumbnailUrl":"/uploads/shoes-150x150.jpg"}]"#,
        )
        .unwrap();
        let chosen = ChosenImage::from(&images[0]);

        let selected = ImageControl::chosen(&chosen);
        assert_eq!(selected.value, "7");
        assert_eq!(selected.preview_src, "/uploads/shoes-150x150.jpg");
        assert!(selected.preview_visible);
        assert!(selected.remove_visible);

        let cleared = ImageControl::cleared();
        assert_eq!(cleared.value, "");
        assert!(!cleared.preview_visible);
        assert!(!cleared.remove_visible);
    }

    #[test]
    fn test_cancel_needs_field() {
        assert_eq!(
            classify("wcs-media-cancel button", attrs(&[("field", "f")])),
            Some(PickerAction::Cancel { field: "f".into() })
        );
        assert_eq!(classify("wcs-media-cancel button", attrs(&[])), None);
    }
}
