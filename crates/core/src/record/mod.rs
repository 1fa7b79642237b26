//! Generic flat records shared by every app.

mod builder;
mod id;
mod value;

pub use builder::*;
pub use id::*;
pub use value::*;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field name → value map of one record.
pub type Fields = BTreeMap<String, FieldValue>;

/// One row of domain data: an id plus a flat field map.
///
/// The fields are flattened next to `id` when serialized, matching the
/// per-app JSON snapshots (`{"id": "1", "text": "Buy milk", "completed": false}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Record {
    #[must_use]
    pub const fn new(id: RecordId, fields: Fields) -> Self {
        Self { id, fields }
    }

    /// Returns a builder for a record with the given id.
    #[must_use]
    pub fn builder(id: impl Into<RecordId>) -> RecordBuilder {
        RecordBuilder::new(id.into())
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Text payload of `field`, if it holds text.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    #[must_use]
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_number)
    }

    #[must_use]
    pub fn flag(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(FieldValue::as_bool)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }
}
