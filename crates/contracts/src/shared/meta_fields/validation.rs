//! Normalization of submitted form values

use super::field_kind::{parse_numeric, FieldKind};
use super::types::FieldSchema;

/// Brings a raw submission into its stored form.
///
/// Returns `None` when the submission is absent or `""` (`"0"` is a value)
/// or does not fit the field kind; the persister treats both the same.
pub fn normalize_submission(field: &FieldSchema, raw: Option<&str>) -> Option<String> {
    let raw = raw.filter(|v| !v.is_empty())?;
    match &field.kind {
        FieldKind::Text | FieldKind::Textarea => Some(raw.to_string()),
        FieldKind::Checkbox => Some("1".to_string()),
        FieldKind::Number { .. } => parse_numeric(raw).map(|_| raw.trim().to_string()),
        FieldKind::Select { options } => options
            .iter()
            .map(|o| o.value.to_stored())
            .find(|v| v == raw),
        FieldKind::Image => {
            let trimmed = raw.trim();
            let valid = !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit());
            valid.then(|| trimmed.to_string())
        }
    }
}
