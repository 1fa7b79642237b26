//! Typed error enum for the record model.
//!
//! Covers schema lookups and field validation so that callers can tell a
//! malformed form submission apart from an unknown app or field.

use thiserror::Error;

/// Errors raised while building or validating records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoreError {
    /// A field value failed its schema rule.
    #[error("invalid value for `{field}`: {reason}")]
    Validation { field: String, reason: String },

    /// A field name that the schema does not declare.
    #[error("unknown field `{field}` for {schema}")]
    UnknownField { schema: String, field: String },

    /// A field exists but has the wrong kind for the requested operation.
    #[error("field `{field}` is not a {expected} field")]
    InvalidFieldKind { field: String, expected: &'static str },

    /// No built-in app schema with this name.
    #[error("unknown app `{0}`")]
    UnknownApp(String),
}

impl CoreError {
    pub(crate) fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation { field: field.to_owned(), reason: reason.into() }
    }

    /// Whether this error came from a field rule rather than a lookup.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
