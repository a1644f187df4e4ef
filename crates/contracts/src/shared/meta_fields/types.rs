//! Field schema and validated field sets

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::field_kind::{FieldKind, MetaValue, SelectOption};

/// Описание одного поля метаданных
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Meta key; also the form control name and DOM id
    pub id: String,
    pub label: String,
    pub description: String,
    pub required: bool,
    /// Written on save when a required field is submitted empty
    pub default: Option<MetaValue>,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldSchema {
    fn with_kind(id: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: String::new(),
            required: false,
            default: None,
            kind,
        }
    }

    pub fn text(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_kind(id, label, FieldKind::Text)
    }

    pub fn textarea(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_kind(id, label, FieldKind::Textarea)
    }

    pub fn checkbox(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_kind(id, label, FieldKind::Checkbox)
    }

    pub fn image(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_kind(id, label, FieldKind::Image)
    }

    pub fn number(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_kind(
            id,
            label,
            FieldKind::Number {
                min: None,
                max: None,
                step: None,
            },
        )
    }

    pub fn select(
        id: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self::with_kind(id, label, FieldKind::Select { options })
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Marks the field required; `default` replaces empty submissions
    pub fn required(mut self, default: impl Into<MetaValue>) -> Self {
        self.required = true;
        self.default = Some(default.into());
        self
    }

    /// Sets min/max/step; ignored for non-number kinds
    pub fn range(mut self, min: Option<f64>, max: Option<f64>, step: Option<f64>) -> Self {
        if let FieldKind::Number {
            min: lo,
            max: hi,
            step: st,
        } = &mut self.kind
        {
            *lo = min;
            *hi = max;
            *st = step;
        }
        self
    }

    /// Stored form of the default value, empty when none is configured
    pub fn default_stored(&self) -> String {
        self.default
            .as_ref()
            .map(MetaValue::to_stored)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldSetError {
    #[error("field id must not be empty")]
    EmptyId,
    #[error("duplicate field id '{0}'")]
    DuplicateId(String),
    #[error("select field '{0}' has no options")]
    EmptyOptions(String),
    #[error("required field '{0}' has no default value")]
    MissingDefault(String),
    #[error("number field '{0}' has min greater than max")]
    InvalidRange(String),
}

/// Ordered, validated collection of fields owned by one binding
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSet {
    fields: Vec<FieldSchema>,
}

impl FieldSet {
    pub fn new(fields: Vec<FieldSchema>) -> Result<Self, FieldSetError> {
        let mut seen = HashSet::new();
        for field in &fields {
            if field.id.trim().is_empty() {
                return Err(FieldSetError::EmptyId);
            }
            if !seen.insert(field.id.as_str()) {
                return Err(FieldSetError::DuplicateId(field.id.clone()));
            }
            if field.required && field.default.is_none() {
                return Err(FieldSetError::MissingDefault(field.id.clone()));
            }
            match &field.kind {
                FieldKind::Select { options } if options.is_empty() => {
                    return Err(FieldSetError::EmptyOptions(field.id.clone()));
                }
                FieldKind::Number {
                    min: Some(min),
                    max: Some(max),
                    ..
                } if min > max => {
                    return Err(FieldSetError::InvalidRange(field.id.clone()));
                }
                _ => {}
            }
        }
        Ok(Self { fields })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldSchema> {
        self.fields.iter()
    }

    pub fn get(&self, id: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a FieldSchema;
    type IntoIter = std::slice::Iter<'a, FieldSchema>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_kind_options() {
        let field = FieldSchema::number("wcs_order", "Order")
            .range(Some(0.0), Some(10.0), Some(1.0))
            .required(0_i64);
        assert!(field.required);
        assert_eq!(field.default_stored(), "0");
        assert_eq!(
            field.kind,
            FieldKind::Number {
                min: Some(0.0),
                max: Some(10.0),
                step: Some(1.0)
            }
        );
    }

    #[test]
    fn test_range_ignored_for_text() {
        let field = FieldSchema::text("t", "T").range(Some(1.0), None, None);
        assert_eq!(field.kind, FieldKind::Text);
    }

    #[test]
    fn test_field_set_rejects_duplicates() {
        let err = FieldSet::new(vec![FieldSchema::text("a", "A"), FieldSchema::text("a", "B")])
            .unwrap_err();
        assert_eq!(err, FieldSetError::DuplicateId("a".into()));
    }

    #[test]
    fn test_field_set_rejects_empty_select() {
        let err = FieldSet::new(vec![FieldSchema::select("s", "S", vec![])]).unwrap_err();
        assert_eq!(err, FieldSetError::EmptyOptions("s".into()));
    }

    #[test]
    fn test_field_set_requires_default_for_required_fields() {
        let mut field = FieldSchema::text("t", "T");
        field.required = true;
        let err = FieldSet::new(vec![field]).unwrap_err();
        assert_eq!(err, FieldSetError::MissingDefault("t".into()));
    }

    #[test]
    fn test_field_set_rejects_inverted_range() {
        let field = FieldSchema::number("n", "N").range(Some(5.0), Some(1.0), None);
        assert!(matches!(
            FieldSet::new(vec![field]),
            Err(FieldSetError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_field_set_keeps_order() {
        let set = FieldSet::new(vec![
            FieldSchema::text("b", "B"),
            FieldSchema::checkbox("a", "A"),
        ])
        .unwrap();
        let ids: Vec<&str> = set.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert!(set.get("a").is_some());
        assert!(set.get("c").is_none());
    }
}
