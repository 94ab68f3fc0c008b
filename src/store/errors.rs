//! # Store Errors
//!
//! Error types for the embedded document store.

use thiserror::Error;

use crate::index::IndexError;
use crate::schema::SchemaError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the document store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Operation addressed a collection the database does not hold
    #[error("Unknown collection '{0}'")]
    UnknownCollection(String),

    /// Document rejected by the collection validator
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Unique index violation or conflicting index declaration
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Metadata directory could not be read or written
    #[error("Metadata error at '{path}': {reason}")]
    Meta { path: String, reason: String },
}

impl StoreError {
    /// Create a metadata error
    pub fn meta(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Meta {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
