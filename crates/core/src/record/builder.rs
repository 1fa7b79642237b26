//! Builder for [`Record`] values, mostly used for seed data and tests.

use super::{FieldValue, Fields, Record, RecordId};

/// Builder for constructing [`Record`] instances.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    id: RecordId,
    fields: Fields,
}

impl RecordBuilder {
    #[must_use]
    pub(super) fn new(id: RecordId) -> Self {
        Self { id, fields: Fields::new() }
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn build(self) -> Record {
        Record { id: self.id, fields: self.fields }
    }
}
