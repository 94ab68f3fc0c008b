//! Schema initializer for traindb
//!
//! Applies a catalog to a `SchemaTarget` in script order: every collection
//! first, then every index. The run is idempotent and all-or-nothing; the
//! first failure aborts the remaining steps and the error names the
//! collection (and index) that failed.

mod errors;
mod initializer;
mod target;

pub use errors::InitError;
pub use initializer::{initialize, InitReport};
pub use target::{Applied, SchemaTarget};
