//! Core types for recordkit
//!
//! This crate contains the record model, field schemas and validation shared
//! across all other crates.

mod apps;
pub mod constants;
pub mod env_config;
mod error;
mod record;
mod schema;
mod theme;

pub use apps::*;
pub use error::*;
pub use record::*;
pub use schema::*;
pub use theme::*;
