//! Case-insensitive substring matching over a schema's search fields.

use recordkit_core::{Record, Schema};
use unicode_normalization::UnicodeNormalization;

/// Fold text for comparison: NFKC, then lowercase.
#[must_use]
pub fn fold(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

/// Pre-folded free-text query.
#[derive(Debug, Clone)]
pub struct TextFilter {
    needle: String,
}

impl TextFilter {
    /// Returns `None` for empty or whitespace-only queries.
    #[must_use]
    pub fn new(query: &str) -> Option<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self { needle: fold(trimmed) })
    }

    /// `true` if any text-like search field of `record` contains the query.
    #[must_use]
    pub fn matches(&self, schema: &Schema, record: &Record) -> bool {
        schema
            .search_fields
            .iter()
            .filter(|field| schema.get_field(field).is_some_and(|f| f.kind.is_text_like()))
            .filter_map(|field| record.text(field))
            .any(|value| fold(value).contains(&self.needle))
    }
}
