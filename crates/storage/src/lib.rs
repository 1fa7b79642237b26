//! Storage layer for recordkit
//!
//! Key-value persistence of whole record lists: one JSON array per app key.
//! `MemoryStore` backs tests, `SqliteStore` backs the CLI.

mod backend;
mod error;
mod memory;
#[cfg(feature = "sqlite")]
mod migrations;
mod snapshot;
#[cfg(feature = "sqlite")]
mod storage;
#[cfg(all(test, feature = "sqlite"))]
mod tests;
pub mod traits;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use memory::MemoryStore;
pub use snapshot::{LoadSource, load_or_seed};
#[cfg(feature = "sqlite")]
pub use storage::SqliteStore;
pub use traits::{KeyValueStore, RecordStore};
