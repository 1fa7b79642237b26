use std::sync::Arc;

use recordkit_core::constants::ID_STRATEGY_ENV;
use recordkit_core::env_config::env_parse_with_default;
use recordkit_core::{App, FieldKind, FieldValue, Fields, IdGenerator, IdStrategy, Record, Schema};
use recordkit_search::{Summary, ViewQuery, summarize};
use recordkit_storage::{LoadSource, RecordStore, load_or_seed};

use crate::ServiceError;

/// One app's record list, kept in step with its store.
pub struct RecordService {
    store: Arc<dyn RecordStore>,
    schema: Schema,
    records: Vec<Record>,
    ids: IdGenerator,
    source: LoadSource,
}

impl RecordService {
    /// Load the list stored under the schema's key, or start from `seed`.
    ///
    /// The id strategy comes from `RECORDKIT_ID_STRATEGY` (`uuid` or `counter`).
    pub fn open(
        store: Arc<dyn RecordStore>,
        schema: Schema,
        seed: Vec<Record>,
    ) -> Result<Self, ServiceError> {
        let (records, source) = load_or_seed(store.as_ref(), &schema.storage_key, seed)?;
        let strategy = env_parse_with_default(ID_STRATEGY_ENV, IdStrategy::default());
        let ids = IdGenerator::seeded(strategy, records.iter().map(|r| &r.id));
        tracing::debug!(
            app = %schema.name,
            count = records.len(),
            source = ?source,
            strategy = %ids.strategy(),
            "opened record list"
        );
        Ok(Self { store, schema, records, ids, source })
    }

    /// Open a built-in app with its own schema and seed data.
    pub fn open_app(store: Arc<dyn RecordStore>, app: App) -> Result<Self, ServiceError> {
        Self::open(store, app.schema(), app.seed())
    }

    /// Switch the id strategy, keeping clear of ids already in the list.
    #[must_use]
    pub fn with_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.ids = IdGenerator::seeded(strategy, self.records.iter().map(|r| &r.id));
        tracing::debug!(
            app = %self.schema.name,
            strategy = %self.ids.strategy(),
            "switched id strategy"
        );
        self
    }

    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Full list in insertion order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Where the list came from when the service was opened.
    #[must_use]
    pub const fn source(&self) -> LoadSource {
        self.source
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Append a new record. Defaults are filled in and the whole field set
    /// is validated before an id is assigned.
    pub fn add(&mut self, fields: Fields) -> Result<Record, ServiceError> {
        let fields = self.schema.with_defaults(fields);
        self.schema.validate(&fields)?;

        let records = &self.records;
        let id = self.ids.next_unused(|candidate| records.iter().any(|r| r.id == *candidate));
        let record = Record::new(id, fields);

        let mut next = self.records.clone();
        next.push(record.clone());
        self.commit(next)?;
        tracing::debug!(app = %self.schema.name, id = %record.id, "added record");
        Ok(record)
    }

    /// Parse raw form input (`field`, `text`) pairs and add the result.
    pub fn add_from_input<'a, I>(&mut self, input: I) -> Result<Record, ServiceError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let fields = self.schema.parse_input(input)?;
        self.add(fields)
    }

    /// Replace every field of record `id` with `fields`.
    pub fn update(&mut self, id: &str, fields: Fields) -> Result<Record, ServiceError> {
        let index = self.position(id)?;
        let fields = self.schema.with_defaults(fields);
        self.schema.validate(&fields)?;

        let record = Record::new(self.records[index].id.clone(), fields);
        let mut next = self.records.clone();
        next[index] = record.clone();
        self.commit(next)?;
        tracing::debug!(app = %self.schema.name, id, "updated record");
        Ok(record)
    }

    /// Merge raw input into the existing fields of `id`, then replace.
    ///
    /// A blank input clears that field.
    pub fn edit_from_input<'a, I>(&mut self, id: &str, input: I) -> Result<Record, ServiceError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let index = self.position(id)?;
        let mut fields = self.records[index].fields.clone();
        for (name, raw) in input {
            let field = self.schema.require_field(name)?;
            match field.parse(raw)? {
                FieldValue::Null => {
                    fields.remove(name);
                },
                value => {
                    fields.insert(field.name.clone(), value);
                },
            }
        }
        self.update(id, fields)
    }

    /// Flip a yes/no field, treating a missing value as `false`.
    pub fn toggle(&mut self, id: &str, field: &str) -> Result<Record, ServiceError> {
        let schema_field = self.schema.require_field(field)?;
        if schema_field.kind != FieldKind::Bool {
            return Err(ServiceError::NotABoolField { field: field.to_owned() });
        }
        let index = self.position(id)?;

        let mut record = self.records[index].clone();
        let flipped = !record.flag(field).unwrap_or(false);
        record.set(field, flipped);

        let mut next = self.records.clone();
        next[index] = record.clone();
        self.commit(next)?;
        tracing::debug!(app = %self.schema.name, id, field, value = flipped, "toggled field");
        Ok(record)
    }

    /// Delete record `id` and return it.
    pub fn remove(&mut self, id: &str) -> Result<Record, ServiceError> {
        let index = self.position(id)?;
        let mut next = self.records.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        tracing::debug!(app = %self.schema.name, id, "removed record");
        Ok(removed)
    }

    /// Filtered and sorted copy of the list.
    pub fn view(&self, query: &ViewQuery) -> Result<Vec<Record>, ServiceError> {
        Ok(recordkit_search::apply(&self.schema, &self.records, query)?)
    }

    /// Count and total of a numeric field, overall and per category.
    pub fn summary(&self, field: &str) -> Result<Summary, ServiceError> {
        Ok(summarize(&self.schema, &self.records, field)?)
    }

    fn position(&self, id: &str) -> Result<usize, ServiceError> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ServiceError::not_found(id))
    }

    /// Persist `next`, then make it the current list.
    fn commit(&mut self, next: Vec<Record>) -> Result<(), ServiceError> {
        if let Err(e) = self.store.save_records(&self.schema.storage_key, &next) {
            tracing::warn!(app = %self.schema.name, error = %e, "write failed, list unchanged");
            return Err(e.into());
        }
        self.records = next;
        Ok(())
    }
}
