//! Exact-match filter on the schema's category field.

use std::fmt;

use recordkit_core::constants::ALL_CATEGORIES;
use recordkit_core::{Record, Schema};
use serde::{Deserialize, Serialize};

use crate::SearchError;

/// Category dropdown state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// The `All` sentinel: no filtering.
    #[default]
    All,
    /// Keep records whose category equals this value exactly.
    Only(String),
}

impl CategoryFilter {
    /// Interpret dropdown input; empty and `All` (any case) disable the filter.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_CATEGORIES) {
            Self::All
        } else {
            Self::Only(trimmed.to_owned())
        }
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(*self, Self::All)
    }

    /// Resolve the field this filter applies to.
    pub(crate) fn field<'s>(&self, schema: &'s Schema) -> Result<Option<&'s str>, SearchError> {
        match *self {
            Self::All => Ok(None),
            Self::Only(_) => schema
                .category_field
                .as_deref()
                .map(Some)
                .ok_or_else(|| SearchError::NoCategoryField(schema.name.clone())),
        }
    }

    pub(crate) fn matches(&self, field: &str, record: &Record) -> bool {
        match *self {
            Self::All => true,
            Self::Only(ref wanted) => record.text(field) == Some(wanted.as_str()),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::All => f.write_str(ALL_CATEGORIES),
            Self::Only(ref v) => f.write_str(v),
        }
    }
}

impl From<Option<&str>> for CategoryFilter {
    fn from(v: Option<&str>) -> Self {
        v.map_or(Self::All, Self::parse)
    }
}
