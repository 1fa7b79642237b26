//! Scalar values stored in record fields.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One scalar field value.
///
/// Serialized untagged so a persisted record stays a flat JSON object
/// (`{"id": "1", "text": "Buy milk", "completed": false}`). Dates are kept as
/// ISO-8601 text and interpreted through the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Explicit JSON `null`.
    Null,
    /// Checkbox-style flag.
    Bool(bool),
    /// Finite number.
    Number(f64),
    /// Free text, enum option or ISO date.
    Text(String),
}

impl FieldValue {
    /// Returns the text payload for text-like values.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match *self {
            Self::Text(ref s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match *self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// `true` for `Null` and for empty or whitespace-only text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match *self {
            Self::Null => true,
            Self::Text(ref s) => s.trim().is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }

    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match *self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(ref s) => f.write_str(s),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_json_scalars() {
        let values: Vec<FieldValue> =
            serde_json::from_str(r#"[null, true, 3, 2.5, "milk"]"#).expect("parse");
        assert_eq!(
            values,
            vec![
                FieldValue::Null,
                FieldValue::Bool(true),
                FieldValue::Number(3.0),
                FieldValue::Number(2.5),
                FieldValue::Text("milk".to_owned()),
            ]
        );
    }

    #[test]
    fn blank_detection() {
        assert!(FieldValue::Null.is_blank());
        assert!(FieldValue::from("   ").is_blank());
        assert!(!FieldValue::from(0).is_blank());
        assert!(!FieldValue::Bool(false).is_blank());
    }

    #[test]
    fn display_is_plain() {
        assert_eq!(FieldValue::from(12).to_string(), "12");
        assert_eq!(FieldValue::from(2.5).to_string(), "2.5");
        assert_eq!(FieldValue::from("x").to_string(), "x");
        assert_eq!(FieldValue::Null.to_string(), "");
    }
}
