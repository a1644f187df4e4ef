//! Field kinds and stored values

use serde::{Deserialize, Serialize};

/// Kind of form control, with the options that only make sense for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Textarea,
    Checkbox,
    Image,
    Number {
        min: Option<f64>,
        max: Option<f64>,
        step: Option<f64>,
    },
    Select {
        options: Vec<SelectOption>,
    },
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Checkbox => "checkbox",
            Self::Image => "image",
            Self::Number { .. } => "number",
            Self::Select { .. } => "select",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: MetaValue,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<MetaValue>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Scalar value as declared in a schema (defaults, option values).
///
/// The meta store keeps plain strings; [`MetaValue::to_stored`] gives the
/// stored form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl MetaValue {
    /// String written to the meta store
    pub fn to_stored(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(*n),
            Self::Flag(true) => "1".to_string(),
            Self::Flag(false) => String::new(),
        }
    }

    /// Loose comparison against a stored string.
    ///
    /// Numeric strings compare by value (`"1.0"` equals `1`), flags compare
    /// by truthiness, everything else compares as text.
    pub fn loose_eq(&self, stored: &str) -> bool {
        match self {
            Self::Flag(flag) => *flag == is_truthy(stored),
            Self::Number(n) => match parse_numeric(stored) {
                Some(other) => other == *n,
                None => format_number(*n) == stored,
            },
            Self::Text(s) => match (parse_numeric(s), parse_numeric(stored)) {
                (Some(a), Some(b)) => a == b,
                _ => s == stored,
            },
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Truthiness of a stored string: empty and `"0"` are false
pub fn is_truthy(stored: &str) -> bool {
    !stored.is_empty() && stored != "0"
}

/// Parses a numeric string, allowing surrounding whitespace
pub(crate) fn parse_numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Integral values are written without a fractional part
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_stored() {
        assert_eq!(MetaValue::from(3_i64).to_stored(), "3");
        assert_eq!(MetaValue::from(2.5).to_stored(), "2.5");
        assert_eq!(MetaValue::from(true).to_stored(), "1");
        assert_eq!(MetaValue::from(false).to_stored(), "");
        assert_eq!(MetaValue::from("abc").to_stored(), "abc");
    }

    #[test]
    fn test_loose_eq_numeric_strings() {
        assert!(MetaValue::from(1_i64).loose_eq("1"));
        assert!(MetaValue::from(1_i64).loose_eq("1.0"));
        assert!(MetaValue::from("10").loose_eq("1e1"));
        assert!(!MetaValue::from("abc").loose_eq("ABC"));
        assert!(!MetaValue::from(1_i64).loose_eq("one"));
    }

    #[test]
    fn test_loose_eq_flags() {
        assert!(MetaValue::from(true).loose_eq("on"));
        assert!(MetaValue::from(false).loose_eq("0"));
        assert!(MetaValue::from(false).loose_eq(""));
    }

    #[test]
    fn test_field_kind_serializes_with_type_tag() {
        let kind = FieldKind::Number {
            min: Some(0.0),
            max: None,
            step: Some(1.0),
        };
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["type"], "number");
        assert_eq!(json["min"], 0.0);
    }
}
