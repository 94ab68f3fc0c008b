//! Write-time document validation for traindb
//!
//! Collections that declare a validator reject non-conforming writes before
//! anything touches the store or its indexes.
//!
//! # Design Principles
//!
//! - Validation happens before any state change
//! - Open schema: undeclared fields pass through
//! - Deterministic: same document, same verdict
//! - Malformed validator specs are rejected at compile time, not write time

mod errors;
mod validator;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, Severity, ValidationDetails};
pub use validator::DocumentValidator;
