//! Core contracts for rngconf.
//!
//! This crate defines the relation schema model, the table of SQL types that
//! support random generation, field-name normalization, and the passive
//! pipeline runtime configuration record.

pub mod error;
pub mod runtime;
pub mod schema;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
pub use runtime::{ResourceConfig, RuntimeConfig};
pub use schema::{Field, Relation, normalize_field_name};
pub use types::{ColumnType, RNG_SUPPORTED_TYPES, SqlType, is_supported};
pub use validation::validate_relation;
