//! Field declarations: kind, validation rule and raw-input parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::error::{CoreError, Result};
use crate::record::FieldValue;

/// What a field holds and how its input control coerces it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase", tag = "type", content = "options")]
pub enum FieldKind {
    Text,
    Number,
    Bool,
    /// ISO-8601 date (`YYYY-MM-DD`) or RFC 3339 timestamp kept as text.
    Date,
    /// Closed set of options, like a `<select>`.
    Enum(Vec<String>),
}

impl FieldKind {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match *self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Date => "date",
            Self::Enum(_) => "enum",
        }
    }

    /// Text, enum and date values take part in free-text search.
    #[must_use]
    pub const fn is_text_like(&self) -> bool {
        matches!(*self, Self::Text | Self::Date | Self::Enum(_))
    }
}

/// Constraints checked on create and edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationRule {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub max_len: Option<usize>,
    pub pattern: Option<Pattern>,
}

/// Compiled `pattern` rule. Compares and serializes as its source text.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl From<Regex> for Pattern {
    fn from(re: Regex) -> Self {
        Self(re)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Declaration of one record field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSchema {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub rule: ValidationRule,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldValue>,
}

impl FieldSchema {
    #[must_use]
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_owned(),
            label: humanize(name),
            kind,
            rule: ValidationRule::default(),
            default: None,
        }
    }

    #[must_use]
    pub fn text(name: &str) -> Self {
        Self::new(name, FieldKind::Text)
    }

    #[must_use]
    pub fn number(name: &str) -> Self {
        Self::new(name, FieldKind::Number)
    }

    #[must_use]
    pub fn boolean(name: &str) -> Self {
        Self::new(name, FieldKind::Bool).default_value(false)
    }

    #[must_use]
    pub fn date(name: &str) -> Self {
        Self::new(name, FieldKind::Date)
    }

    #[must_use]
    pub fn options(name: &str, options: &[&str]) -> Self {
        Self::new(name, FieldKind::Enum(options.iter().map(|o| (*o).to_owned()).collect()))
    }

    #[must_use]
    pub fn label(mut self, label: &str) -> Self {
        label.clone_into(&mut self.label);
        self
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.rule.required = true;
        self
    }

    #[must_use]
    pub const fn min(mut self, min: f64) -> Self {
        self.rule.min = Some(min);
        self
    }

    #[must_use]
    pub const fn max(mut self, max: f64) -> Self {
        self.rule.max = Some(max);
        self
    }

    #[must_use]
    pub const fn max_len(mut self, max_len: usize) -> Self {
        self.rule.max_len = Some(max_len);
        self
    }

    /// Require text values to match `re`.
    #[must_use]
    pub fn pattern(mut self, re: Regex) -> Self {
        self.rule.pattern = Some(Pattern::from(re));
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Coerce raw form input into a typed value.
    ///
    /// Blank input maps to `Null`; malformed numbers, flags and dates are
    /// rejected rather than silently becoming `0` or `NaN`.
    pub fn parse(&self, raw: &str) -> Result<FieldValue> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(FieldValue::Null);
        }
        match self.kind {
            FieldKind::Text => Ok(FieldValue::Text(raw.to_owned())),
            FieldKind::Number => match raw.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(FieldValue::Number(n)),
                _ => Err(CoreError::validation(&self.name, format!("`{raw}` is not a number"))),
            },
            FieldKind::Bool => parse_flag(raw).map(FieldValue::Bool).ok_or_else(|| {
                CoreError::validation(&self.name, format!("`{raw}` is not true or false"))
            }),
            FieldKind::Date => {
                if parse_date(raw).is_some() {
                    Ok(FieldValue::Text(raw.to_owned()))
                } else {
                    Err(CoreError::validation(&self.name, format!("`{raw}` is not a date")))
                }
            },
            FieldKind::Enum(ref options) => options
                .iter()
                .find(|o| o.eq_ignore_ascii_case(raw))
                .map(|o| FieldValue::Text(o.clone()))
                .ok_or_else(|| {
                    CoreError::validation(
                        &self.name,
                        format!("`{raw}` is not one of {}", options.join(", ")),
                    )
                }),
        }
    }

    /// Check an already-typed value against kind and rule.
    pub fn check(&self, value: &FieldValue) -> Result<()> {
        if value.is_blank() {
            return if self.rule.required {
                Err(CoreError::validation(&self.name, "is required"))
            } else {
                Ok(())
            };
        }
        match (&self.kind, value) {
            (&FieldKind::Number, &FieldValue::Number(n)) => self.check_range(n),
            (&FieldKind::Bool, &FieldValue::Bool(_)) => Ok(()),
            (&FieldKind::Text, &FieldValue::Text(ref s)) => self.check_text(s),
            (&FieldKind::Date, &FieldValue::Text(ref s)) => {
                if parse_date(s).is_some() {
                    Ok(())
                } else {
                    Err(CoreError::validation(&self.name, format!("`{s}` is not a date")))
                }
            },
            (&FieldKind::Enum(ref options), &FieldValue::Text(ref s)) => {
                if options.iter().any(|o| o == s) {
                    Ok(())
                } else {
                    Err(CoreError::validation(
                        &self.name,
                        format!("`{s}` is not one of {}", options.join(", ")),
                    ))
                }
            },
            (kind, other) => Err(CoreError::validation(
                &self.name,
                format!("expected {}, got {}", kind.name(), other.kind_name()),
            )),
        }
    }

    fn check_range(&self, n: f64) -> Result<()> {
        if !n.is_finite() {
            return Err(CoreError::validation(&self.name, "must be a finite number"));
        }
        if let Some(min) = self.rule.min
            && n < min
        {
            return Err(CoreError::validation(&self.name, format!("must be at least {min}")));
        }
        if let Some(max) = self.rule.max
            && n > max
        {
            return Err(CoreError::validation(&self.name, format!("must be at most {max}")));
        }
        Ok(())
    }

    fn check_text(&self, s: &str) -> Result<()> {
        if let Some(max_len) = self.rule.max_len
            && s.chars().count() > max_len
        {
            return Err(CoreError::validation(
                &self.name,
                format!("must be at most {max_len} characters"),
            ));
        }
        if let Some(ref pattern) = self.rule.pattern
            && !pattern.is_match(s)
        {
            return Err(CoreError::validation(
                &self.name,
                format!("`{s}` does not match `{}`", pattern.as_str()),
            ));
        }
        Ok(())
    }
}

/// Parse an ISO-8601 date or RFC 3339 timestamp into a comparable instant.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" | "checked" | "done" => Some(true),
        "false" | "no" | "0" | "off" | "unchecked" => Some(false),
        _ => None,
    }
}

fn humanize(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_input_rejects_garbage() {
        let field = FieldSchema::number("amount").min(0.0);
        assert_eq!(field.parse(" 12.5 "), Ok(FieldValue::Number(12.5)));
        assert!(field.parse("12abc").unwrap_err().is_validation());
        assert!(field.parse("NaN").is_err());
        assert!(field.parse("inf").is_err());
        assert!(field.check(&FieldValue::Number(-1.0)).is_err());
    }

    #[test]
    fn blank_input_is_null() {
        let field = FieldSchema::number("amount");
        assert_eq!(field.parse("   "), Ok(FieldValue::Null));
        assert!(field.check(&FieldValue::Null).is_ok());
        assert!(field.clone().required().check(&FieldValue::Null).is_err());
    }

    #[test]
    fn enum_input_is_canonicalised() {
        let field = FieldSchema::options("status", &["Pending", "Shipped"]);
        assert_eq!(field.parse("shipped"), Ok(FieldValue::Text("Shipped".to_owned())));
        assert!(field.parse("Lost").is_err());
        assert!(field.check(&FieldValue::from("pending")).is_err());
    }

    #[test]
    fn date_input_must_parse() {
        let field = FieldSchema::date("due");
        assert!(field.parse("2024-02-29").is_ok());
        assert!(field.parse("2023-02-29").is_err());
        assert!(field.parse("2024-03-01T10:00:00Z").is_ok());
    }

    #[test]
    fn pattern_and_length_rules() {
        let code = Regex::new(r"^[A-Z]{2}\d{3}$").expect("regex");
        let field = FieldSchema::text("code").pattern(code).max_len(5);
        assert!(field.check(&FieldValue::from("AB123")).is_ok());
        let err = field.check(&FieldValue::from("ab123")).expect_err("no match");
        assert_eq!(
            err,
            CoreError::Validation {
                field: "code".to_owned(),
                reason: r"`ab123` does not match `^[A-Z]{2}\d{3}$`".to_owned(),
            }
        );
        assert!(FieldSchema::text("t").max_len(3).check(&FieldValue::from("four")).is_err());
    }

    #[test]
    fn pattern_rule_reads_as_its_source() {
        let field = FieldSchema::text("code").pattern(Regex::new("^x+$").expect("regex"));
        let same = FieldSchema::text("code").pattern(Regex::new("^x+$").expect("regex"));
        assert_eq!(field, same);

        let rule = serde_json::to_value(&field.rule).expect("serialize");
        assert_eq!(rule["pattern"], "^x+$");
        assert!(field.check(&FieldValue::from("xxx")).is_ok());
    }

    #[test]
    fn kind_mismatch_is_rejected() {
        let field = FieldSchema::boolean("completed");
        assert!(field.check(&FieldValue::from("yes")).is_err());
        assert_eq!(field.parse("Done"), Ok(FieldValue::Bool(true)));
    }

    #[test]
    fn labels_are_humanized() {
        assert_eq!(FieldSchema::text("unit_price").label, "Unit price");
    }
}
