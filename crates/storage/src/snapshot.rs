//! Startup load of a persisted record list with seed fallback.

use recordkit_core::Record;

use crate::error::StorageError;
use crate::traits::RecordStore;

/// Where the list returned by [`load_or_seed`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Parsed from the store.
    Stored,
    /// Nothing was stored; seed data used.
    Seeded,
    /// Stored blob was unreadable; seed data used.
    Recovered,
}

/// Read the list under `key`, falling back to `seed` when it is absent or corrupt.
///
/// Backend failures (I/O, SQL) are returned; only unreadable data degrades
/// to the seed list.
pub fn load_or_seed<S: RecordStore + ?Sized>(
    store: &S,
    key: &str,
    seed: Vec<Record>,
) -> Result<(Vec<Record>, LoadSource), StorageError> {
    match store.load_records(key) {
        Ok(Some(records)) => {
            tracing::debug!(key, count = records.len(), "loaded stored records");
            Ok((records, LoadSource::Stored))
        },
        Ok(None) => {
            tracing::info!(key, count = seed.len(), "no stored records, using seed data");
            Ok((seed, LoadSource::Seeded))
        },
        Err(e) if e.is_corruption() => {
            tracing::warn!(key, error = %e, "stored records unreadable, using seed data");
            Ok((seed, LoadSource::Recovered))
        },
        Err(e) => Err(e),
    }
}
