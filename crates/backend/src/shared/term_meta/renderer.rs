use std::collections::HashMap;

use contracts::shared::meta_fields::{is_truthy, FieldKind, FieldSchema, FieldSet, MetaValue};

use crate::shared::html::{esc_attr, esc_html, esc_url};

/// Stored values of an existing term, with image previews already resolved
#[derive(Debug, Clone, Default)]
pub struct ExistingValues {
    pub values: HashMap<String, String>,
    /// Thumbnail URL per image field id
    pub thumbnails: HashMap<String, String>,
}

impl ExistingValues {
    fn value(&self, id: &str) -> &str {
        self.values.get(id).map(String::as_str).unwrap_or("")
    }
}

/// Hidden nonce input re-submitted with the form
#[derive(Debug, Clone)]
pub struct NonceField {
    pub name: String,
    pub token: String,
}

impl NonceField {
    fn render(&self) -> String {
        format!(
            r#"<input type="hidden" id="{name}" name="{name}" value="{token}" />"#,
            name = esc_attr(&self.name),
            token = esc_attr(&self.token),
        )
    }
}

pub struct MetaFormRenderer;

impl MetaFormRenderer {
    /// Form section for `fields`; `existing` is `None` on the create screen.
    pub fn render(fields: &FieldSet, existing: Option<&ExistingValues>, nonce: &NonceField) -> String {
        let empty = ExistingValues::default();
        let existing = existing.unwrap_or(&empty);

        let mut out = nonce.render();
        out.push_str("\n<table class=\"form-table\">\n");
        for field in fields {
            out.push_str(&render_row(field, existing));
        }
        out.push_str("</table>\n");
        out
    }
}

fn render_row(field: &FieldSchema, existing: &ExistingValues) -> String {
    let id = esc_attr(&field.id);
    let value = existing.value(&field.id);
    let control = match &field.kind {
        FieldKind::Text => format!(
            r#"<input type="text"{required} name="{id}" id="{id}" value="{value}" />"#,
            required = required_attr(field),
            value = esc_attr(value),
        ),
        FieldKind::Textarea => format!(
            r#"<textarea style="width: 100%; min-height: 200px;"{required} name="{id}" id="{id}">{value}</textarea>"#,
            required = required_attr(field),
            value = esc_html(value),
        ),
        FieldKind::Number { min, max, step } => format!(
            r#"<input type="number"{required}{step}{min}{max} name="{id}" id="{id}" value="{value}" />"#,
            required = required_attr(field),
            step = number_attr("step", *step),
            min = number_attr("min", *min),
            max = number_attr("max", *max),
            value = esc_attr(value),
        ),
        FieldKind::Checkbox => format!(
            r#"<input type="checkbox"{required} name="{id}" id="{id}"{checked} />"#,
            required = required_attr(field),
            checked = if is_truthy(value) {
                r#" checked="checked""#
            } else {
                ""
            },
        ),
        FieldKind::Select { options } => {
            let mut select = format!(r#"<select name="{id}" id="{id}">"#);
            for option in options {
                // Loose comparison: "1" selects an option declared as 1.0
                let selected = if !value.is_empty() && option.value.loose_eq(value) {
                    r#" selected="selected""#
                } else {
                    ""
                };
                select.push_str(&format!(
                    r#"<option{selected} value="{v}">{label}</option>"#,
                    v = esc_attr(&option.value.to_stored()),
                    label = esc_html(&option.label),
                ));
            }
            select.push_str("</select>");
            select
        }
        FieldKind::Image => render_image_control(field, value, existing.thumbnails.get(&field.id)),
    };

    format!(
        "<tr>\n<th><label for=\"{id}\">{label}</label></th>\n<td>\n{control}\n<br>\n<span class=\"description\">{desc}</span>\n</td>\n</tr>\n",
        label = esc_html(&field.label),
        desc = esc_html(&field.description),
    )
}

/// Preview plus upload/remove triggers; the media picker script binds to
/// the `wcs_*_image_button_{id}` classes.
fn render_image_control(field: &FieldSchema, value: &str, thumbnail: Option<&String>) -> String {
    let id = esc_attr(&field.id);
    let (display, src) = match thumbnail {
        Some(url) => ("block", esc_url(url)),
        None => ("none", String::new()),
    };
    let remove_hidden = if value.is_empty() { " hidden" } else { "" };
    format!(
        concat!(
            r#"<div id="wcs_{id}" class="wcs-image-preview" style="float: left; margin-right: 10px;">"#,
            r#"<img style="display: {display};" src="{src}" width="60" height="60" /></div>"#,
            "\n",
            r#"<div style="line-height: 60px;">"#,
            "\n",
            r#"<input type="hidden" id="{id}" name="{id}" value="{value}" />"#,
            "\n",
            r#"<button type="button" class="wcs_upload_image_button_{id} button" data-field="{id}">Upload/Add image</button>"#,
            "\n",
            r#"<button type="button" class="wcs_remove_image_button_{id} button" data-field="{id}"{remove_hidden}>Remove image</button>"#,
            "\n</div>\n",
            r#"<div class="clear"></div>"#,
        ),
        id = id,
        display = display,
        src = src,
        value = esc_attr(value),
        remove_hidden = remove_hidden,
    )
}

fn required_attr(field: &FieldSchema) -> &'static str {
    if field.required {
        " required"
    } else {
        ""
    }
}

fn number_attr(name: &str, value: Option<f64>) -> String {
    match value {
        Some(v) => format!(r#" {}="{}""#, name, MetaValue::Number(v).to_stored()),
        None => String::new(),
    }
}
