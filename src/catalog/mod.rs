//! Schema catalog for traindb
//!
//! The catalog is the declarative description of everything the bootstrap
//! must make true of the target database: which collections exist, which
//! validator each one carries, and which indexes back them.
//!
//! # Design Principles
//!
//! - Declarative: the catalog is plain data, applied by `init`
//! - Self-checked: malformed specs are rejected before they reach a target
//! - Serializable: specs round-trip through the metadata directory

mod platform;
mod types;

pub use platform::{training_platform, EMAIL_PATTERN};
pub use types::{Catalog, CollectionSpec, FieldRule, FieldType, IndexSpec, ValidatorSpec};
