//! Unified storage backend with enum dispatch.

#[cfg(feature = "sqlite")]
use std::path::Path;

use crate::error::StorageError;
use crate::memory::MemoryStore;
use crate::traits::KeyValueStore;

macro_rules! dispatch {
    ($self:expr, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StorageBackend::Memory(s) => <MemoryStore as KeyValueStore>::$method(s, $($arg),*),
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite(s) => <crate::SqliteStore as KeyValueStore>::$method(s, $($arg),*),
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    Memory(MemoryStore),
    #[cfg(feature = "sqlite")]
    Sqlite(crate::SqliteStore),
}

impl StorageBackend {
    #[must_use]
    pub fn new_memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    #[cfg(feature = "sqlite")]
    pub fn new_sqlite(db_path: &Path) -> Result<Self, StorageError> {
        Ok(Self::Sqlite(crate::SqliteStore::new(db_path)?))
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match *self {
            Self::Memory(_) => "memory",
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "sqlite",
        }
    }
}

impl KeyValueStore for StorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        dispatch!(self, get(key))
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        dispatch!(self, put(key, value))
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        dispatch!(self, remove(key))
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        dispatch!(self, keys())
    }
}
