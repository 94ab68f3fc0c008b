//! The seam between the initializer and a database
//!
//! A `SchemaTarget` is anything that can be told "make this collection
//! exist with this validator" and "make this index exist". The embedded
//! `store::Database` implements it; so could a driver for an external
//! document database.

use crate::catalog::{CollectionSpec, IndexSpec};

use super::errors::InitError;

/// What an ensure step did to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The structure did not exist and was created
    Created,
    /// The structure existed and matched the declaration
    Unchanged,
    /// The structure existed and was brought in line with the declaration
    Updated,
}

/// A database the initializer can apply a catalog to.
pub trait SchemaTarget {
    /// Ensure the collection exists and carries the declared validator
    /// (or none). Must be idempotent.
    fn ensure_collection(&mut self, spec: &CollectionSpec) -> Result<Applied, InitError>;

    /// Ensure the index exists on the named collection. Creating an index
    /// identical to an existing one must be a no-op; a conflicting
    /// declaration or violating data must fail.
    fn ensure_index(&mut self, collection: &str, spec: &IndexSpec) -> Result<Applied, InitError>;
}
