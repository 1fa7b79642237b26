//! Service layer for recordkit
//!
//! Owns the in-memory record list of one app and keeps it in step with the
//! store: every mutation is persisted before it becomes visible.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::ref_patterns, reason = "Ref patterns are clearer in some contexts")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod error;
mod record_service;
#[cfg(test)]
mod tests;
mod theme_service;

pub use error::ServiceError;
pub use record_service::RecordService;
pub use theme_service::ThemeService;
