//! Typed error enum for the storage layer.
//!
//! Lets callers tell corrupt snapshots (recoverable by re-seeding) apart
//! from backend failures (worth retrying or surfacing).

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    /// SQL / connection failure.
    #[cfg(feature = "sqlite")]
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Connection pool could not hand out a connection.
    #[cfg(feature = "sqlite")]
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Stored value could not be (de)serialized.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(String),

    /// Filesystem failure while preparing the database location.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// In-memory store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match *self {
            #[cfg(feature = "sqlite")]
            Self::Database(rusqlite::Error::SqliteFailure(ref e, _)) => matches!(
                e.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ),
            #[cfg(feature = "sqlite")]
            Self::Pool(_) => true,
            _ => false,
        }
    }

    /// Whether the stored data itself is unreadable.
    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        matches!(*self, Self::DataCorruption { .. })
    }

    pub(crate) fn corruption(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::DataCorruption { context: context.into(), source: Box::new(source) }
    }
}
