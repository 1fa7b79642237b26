//! Declarative per-app schemas driving validation, search and sort.

mod field;

pub use field::*;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::record::{FieldValue, Fields};

/// Direction of the single-key sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(format!("unknown sort direction: {other}")),
        }
    }
}

/// Sort key plus direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub fn ascending(key: &str) -> Self {
        Self { key: key.to_owned(), direction: SortDirection::Ascending }
    }

    #[must_use]
    pub fn descending(key: &str) -> Self {
        Self { key: key.to_owned(), direction: SortDirection::Descending }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key, self.direction.as_str())
    }
}

/// Shape of one app's records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct Schema {
    /// App name, e.g. `todo`.
    pub name: String,
    /// Key the full record list is persisted under.
    pub storage_key: String,
    /// Field declarations in form order.
    pub fields: Vec<FieldSchema>,
    /// Fields checked by the free-text filter (OR semantics).
    pub search_fields: Vec<String>,
    /// Field the category dropdown filters on.
    pub category_field: Option<String>,
    /// Sort applied when the caller does not choose one.
    pub default_sort: Option<SortSpec>,
}

impl Schema {
    #[must_use]
    pub fn new(name: &str, storage_key: &str) -> Self {
        Self {
            name: name.to_owned(),
            storage_key: storage_key.to_owned(),
            fields: Vec::new(),
            search_fields: Vec::new(),
            category_field: None,
            default_sort: None,
        }
    }

    #[must_use]
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn search(mut self, fields: &[&str]) -> Self {
        self.search_fields = fields.iter().map(|f| (*f).to_owned()).collect();
        self
    }

    #[must_use]
    pub fn category(mut self, field: &str) -> Self {
        self.category_field = Some(field.to_owned());
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.default_sort = Some(sort);
        self
    }

    /// Look up a field declaration by name.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn require_field(&self, name: &str) -> Result<&FieldSchema> {
        self.get_field(name).ok_or_else(|| CoreError::UnknownField {
            schema: self.name.clone(),
            field: name.to_owned(),
        })
    }

    /// Options of the category field, if the schema has one.
    #[must_use]
    pub fn categories(&self) -> Option<&[String]> {
        let field = self.get_field(self.category_field.as_deref()?)?;
        match field.kind {
            FieldKind::Enum(ref options) => Some(options),
            _ => None,
        }
    }

    /// Parse raw `(name, input)` pairs the way the create/edit form does.
    ///
    /// Blank optional inputs are dropped. The result is completed with
    /// defaults and validated as a whole.
    pub fn parse_input<'a, I>(&self, input: I) -> Result<Fields>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut fields = Fields::new();
        for (name, raw) in input {
            let field = self.require_field(name)?;
            let value = field.parse(raw)?;
            if !value.is_blank() {
                fields.insert(field.name.clone(), value);
            }
        }
        let fields = self.with_defaults(fields);
        self.validate(&fields)?;
        Ok(fields)
    }

    /// Fill in declared defaults for missing fields.
    #[must_use]
    pub fn with_defaults(&self, mut fields: Fields) -> Fields {
        for field in &self.fields {
            if let Some(ref default) = field.default {
                fields.entry(field.name.clone()).or_insert_with(|| default.clone());
            }
        }
        fields
    }

    /// Validate a complete field set: no unknown fields, every rule holds.
    pub fn validate(&self, fields: &Fields) -> Result<()> {
        if let Some(unknown) = fields.keys().find(|k| self.get_field(k).is_none()) {
            return Err(CoreError::UnknownField {
                schema: self.name.clone(),
                field: unknown.clone(),
            });
        }
        for field in &self.fields {
            field.check(fields.get(&field.name).unwrap_or(&FieldValue::Null))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense_schema() -> Schema {
        Schema::new("expenses", "expenses")
            .field(FieldSchema::text("description").required())
            .field(FieldSchema::number("amount").required().min(0.0))
            .field(FieldSchema::options("category", &["Food", "Other"]).default_value("Other"))
            .search(&["description"])
            .category("category")
    }

    #[test]
    fn parse_input_types_and_defaults() {
        let fields = expense_schema()
            .parse_input([("description", "Lunch"), ("amount", "12.50")])
            .expect("valid input");
        assert_eq!(fields.get("amount"), Some(&FieldValue::Number(12.5)));
        assert_eq!(fields.get("category"), Some(&FieldValue::from("Other")));
    }

    #[test]
    fn parse_input_rejects_malformed_number() {
        let err = expense_schema()
            .parse_input([("description", "Lunch"), ("amount", "twelve")])
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "amount"));
    }

    #[test]
    fn parse_input_rejects_missing_required() {
        let err = expense_schema().parse_input([("amount", "3")]).unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "description"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = expense_schema()
            .parse_input([("description", "x"), ("amount", "1"), ("colour", "red")])
            .unwrap_err();
        assert!(matches!(err, CoreError::UnknownField { .. }));
    }

    #[test]
    fn categories_come_from_enum_options() {
        let schema = expense_schema();
        assert_eq!(schema.categories(), Some(&["Food".to_owned(), "Other".to_owned()][..]));
    }

    #[test]
    fn sort_direction_parses() {
        assert_eq!("DESC".parse::<SortDirection>(), Ok(SortDirection::Descending));
        assert_eq!(SortDirection::Ascending.reversed(), SortDirection::Descending);
    }
}
