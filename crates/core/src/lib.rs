//! recordgen_core - attribute token parsing and schema resolution.
//!
//! Pure functions only: no I/O, no logging. The `recordgen` binary is the
//! imperative shell around this crate.

pub mod schema;
pub mod serde_ext;
pub mod token;

pub use schema::{resolve_schema, Diagnostic, RawSchemaInput, Schema, ValidationFailure};
pub use token::{parse_attribute, parse_index, parse_range, TokenError};
