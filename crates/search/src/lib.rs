//! View pipeline for recordkit record lists
//!
//! Derives the displayed list from the full record list in three steps:
//! 1. text filter → case-insensitive substring match over the search fields
//! 2. category filter → exact match on the category field (`All` disables it)
//! 3. sort → one key, ascending or descending, stable
//!
//! Every call is a full O(n) pass; record lists are small.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod category;
mod sort;
mod summary;
mod text;
#[cfg(test)]
mod tests;

pub use category::CategoryFilter;
pub use sort::{Comparator, compare_values};
pub use summary::{Summary, Totals, summarize};
pub use text::{TextFilter, fold};

use recordkit_core::{Record, Schema, SortSpec};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while deriving a view.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SearchError {
    #[error("cannot sort {schema} by unknown field `{key}`")]
    UnknownSortKey { schema: String, key: String },

    #[error("{0} has no category field to filter on")]
    NoCategoryField(String),

    #[error("unknown field `{field}` for {schema}")]
    UnknownField { schema: String, field: String },

    #[error("field `{0}` is not numeric")]
    NotNumeric(String),
}

/// The three user inputs of the view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewQuery {
    /// Free-text query; blank disables the text filter.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub category: CategoryFilter,
    /// `None` falls back to the schema's default sort, or keeps list order.
    #[serde(default)]
    pub sort: Option<SortSpec>,
}

impl ViewQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        text.clone_into(&mut self.text);
        self
    }

    #[must_use]
    pub fn category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }
}

/// Run the pipeline over `records`, returning the derived list.
pub fn apply(schema: &Schema, records: &[Record], query: &ViewQuery) -> Result<Vec<Record>, SearchError> {
    let text = TextFilter::new(&query.text);
    let category_field = query.category.field(schema)?;
    let comparator = query
        .sort
        .as_ref()
        .or(schema.default_sort.as_ref())
        .map(|spec| Comparator::new(schema, spec))
        .transpose()?;

    let mut view: Vec<Record> = records
        .iter()
        .filter(|r| text.as_ref().is_none_or(|t| t.matches(schema, r)))
        .filter(|r| category_field.is_none_or(|field| query.category.matches(field, r)))
        .cloned()
        .collect();

    if let Some(comparator) = comparator {
        comparator.sort(&mut view);
    }

    tracing::debug!(
        schema = %schema.name,
        total = records.len(),
        shown = view.len(),
        "derived view"
    );
    Ok(view)
}
