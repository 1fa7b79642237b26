//! Typed error enum for the service layer.
//!
//! Unifies validation, view and storage failures into a single error type,
//! so callers can match on specific failure modes.

use recordkit_core::CoreError;
use recordkit_search::SearchError;
use recordkit_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServiceError {
    /// Input failed the schema (bad number, missing required field, ...).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// View query refers to something the schema lacks.
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    #[error("no record with id `{id}`")]
    NotFound { id: String },

    #[error("field `{field}` is not a yes/no field")]
    NotABoolField { field: String },
}

impl ServiceError {
    pub(crate) fn not_found(id: &str) -> Self {
        Self::NotFound { id: id.to_owned() }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(*self, Self::NotFound { .. })
    }

    /// Whether this error is likely transient (worth retrying).
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match *self {
            Self::Storage(ref e) => e.is_transient(),
            _ => false,
        }
    }

    /// Whether the caller's input was rejected, as opposed to an I/O failure.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(*self, Self::Core(_) | Self::Search(_) | Self::NotABoolField { .. })
    }
}
