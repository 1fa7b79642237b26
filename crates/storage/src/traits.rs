//! Storage traits
//!
//! `KeyValueStore` is the raw string store (one JSON blob per key, like
//! browser `localStorage`). `RecordStore` is the typed view used by the
//! service layer and is implemented for every `KeyValueStore`.

use recordkit_core::Record;

use crate::error::StorageError;

/// Raw key → string persistence.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, overwriting any previous value.
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Returns `true` if something was removed.
    fn remove(&self, key: &str) -> Result<bool, StorageError>;

    /// All keys, sorted.
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// Whole-list persistence of records under one key.
pub trait RecordStore: Send + Sync {
    /// Load the list stored under `key`.
    ///
    /// `Ok(None)` when nothing is stored; `DataCorruption` when the stored
    /// blob is not a valid record list.
    fn load_records(&self, key: &str) -> Result<Option<Vec<Record>>, StorageError>;

    /// Overwrite the list stored under `key`.
    fn save_records(&self, key: &str, records: &[Record]) -> Result<(), StorageError>;

    /// Raw access for non-record values such as preferences.
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn put_raw(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> RecordStore for T {
    fn load_records(&self, key: &str) -> Result<Option<Vec<Record>>, StorageError> {
        let Some(raw) = self.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::corruption(format!("record list under `{key}`"), e))
    }

    fn save_records(&self, key: &str, records: &[Record]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(records)
            .map_err(|e| StorageError::corruption(format!("record list under `{key}`"), e))?;
        self.put(key, &raw)
    }

    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.get(key)
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.put(key, value)
    }
}
