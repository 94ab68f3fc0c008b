//! # Initializer Errors
//!
//! The bootstrap error taxonomy. Every variant is fatal to the run: there
//! is no local recovery, and the remaining steps are skipped.

use thiserror::Error;

/// Errors surfaced by a bootstrap run
#[derive(Debug, Clone, Error)]
pub enum InitError {
    /// Target database unreachable or its metadata unusable
    #[error("Database unreachable: {0}")]
    Connection(String),

    /// Declared validator rejected by the target
    #[error("Validator rejected for collection '{collection}': {reason}")]
    ValidatorRejected { collection: String, reason: String },

    /// Declared index conflicts with an existing index or existing data
    #[error("Index conflict on '{collection}.{index}': {reason}")]
    IndexConflict {
        collection: String,
        index: String,
        reason: String,
    },
}

impl InitError {
    /// The collection the failing step addressed, when known.
    pub fn collection(&self) -> Option<&str> {
        match self {
            InitError::Connection(_) => None,
            InitError::ValidatorRejected { collection, .. } => Some(collection),
            InitError::IndexConflict { collection, .. } => Some(collection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_identify_failing_step() {
        let err = InitError::IndexConflict {
            collection: "reps".into(),
            index: "userId_1".into(),
            reason: "existing documents contain duplicate key (\"u1\")".into(),
        };

        assert_eq!(err.collection(), Some("reps"));
        let display = format!("{}", err);
        assert!(display.contains("reps.userId_1"));

        let err = InitError::ValidatorRejected {
            collection: "users".into(),
            reason: "invalid pattern".into(),
        };
        assert!(format!("{}", err).contains("users"));
    }
}
