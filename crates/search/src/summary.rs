//! Totals of a numeric field, overall and per category.

use std::collections::BTreeMap;

use recordkit_core::{FieldKind, Record, Schema};
use serde::Serialize;

use crate::SearchError;

/// Count and sum of one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub count: usize,
    pub total: f64,
}

impl Totals {
    fn add(&mut self, value: Option<f64>) {
        self.count = self.count.saturating_add(1);
        self.total += value.unwrap_or(0.0);
    }
}

/// Result of [`summarize`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub field: String,
    pub overall: Totals,
    /// Keyed by category value; records without one land under `""`.
    pub by_category: BTreeMap<String, Totals>,
}

/// Sum `field` over `records`, grouped by the schema's category field.
pub fn summarize(schema: &Schema, records: &[Record], field: &str) -> Result<Summary, SearchError> {
    let declared = schema.get_field(field).ok_or_else(|| SearchError::UnknownField {
        schema: schema.name.clone(),
        field: field.to_owned(),
    })?;
    if declared.kind != FieldKind::Number {
        return Err(SearchError::NotNumeric(field.to_owned()));
    }

    let mut overall = Totals::default();
    let mut by_category: BTreeMap<String, Totals> = BTreeMap::new();
    for record in records {
        let value = record.number(field);
        overall.add(value);
        if let Some(ref category_field) = schema.category_field {
            let key = record.text(category_field).unwrap_or_default().to_owned();
            by_category.entry(key).or_default().add(value);
        }
    }
    Ok(Summary { field: field.to_owned(), overall, by_category })
}
