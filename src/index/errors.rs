//! Index error types
//!
//! Error codes:
//! - TRAIN_DUPLICATE_KEY (REJECT)
//! - TRAIN_INDEX_CONFLICT (FATAL)

use std::fmt;

/// Severity levels for index errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Write rejected, store untouched
    Reject,
    /// Bootstrap must abort
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Index-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexErrorCode {
    /// Unique index rejected a duplicate key
    DuplicateKey,
    /// Declared index conflicts with existing index or existing data
    IndexConflict,
}

impl IndexErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            IndexErrorCode::DuplicateKey => "TRAIN_DUPLICATE_KEY",
            IndexErrorCode::IndexConflict => "TRAIN_INDEX_CONFLICT",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            IndexErrorCode::DuplicateKey => Severity::Reject,
            IndexErrorCode::IndexConflict => Severity::Fatal,
        }
    }
}

impl fmt::Display for IndexErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Index error type with full context
#[derive(Debug)]
pub struct IndexError {
    /// Error code
    code: IndexErrorCode,
    /// Human-readable message
    message: String,
    /// Collection the index belongs to
    collection: String,
    /// Index name
    index: String,
}

impl IndexError {
    /// Create a duplicate key error
    pub fn duplicate_key(
        collection: impl Into<String>,
        index: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        let collection = collection.into();
        let index = index.into();
        Self {
            message: format!(
                "Duplicate key {} for unique index '{}' on '{}'",
                key.into(),
                index,
                collection
            ),
            code: IndexErrorCode::DuplicateKey,
            collection,
            index,
        }
    }

    /// Create an index conflict error
    pub fn conflict(
        collection: impl Into<String>,
        index: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        let collection = collection.into();
        let index = index.into();
        Self {
            message: format!(
                "Index '{}' on '{}' conflicts: {}",
                index,
                collection,
                reason.into()
            ),
            code: IndexErrorCode::IndexConflict,
            collection,
            index,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> IndexErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the collection the index belongs to
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the index name
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for IndexError {}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;
