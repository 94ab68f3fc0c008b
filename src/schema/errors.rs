//! Schema error types
//!
//! Error codes:
//! - TRAIN_SCHEMA_VALIDATION_FAILED (REJECT)
//! - TRAIN_SCHEMA_BAD_VALIDATOR (FATAL)

use std::fmt;

/// Severity levels for schema errors
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

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Document violates the collection validator
    ValidationFailed,
    /// Validator spec itself is malformed
    BadValidator,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::ValidationFailed => "TRAIN_SCHEMA_VALIDATION_FAILED",
            SchemaErrorCode::BadValidator => "TRAIN_SCHEMA_BAD_VALIDATOR",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            SchemaErrorCode::ValidationFailed => Severity::Reject,
            SchemaErrorCode::BadValidator => Severity::Fatal,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Validation failure details
#[derive(Debug, Clone)]
pub struct ValidationDetails {
    /// Field name
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: "field to be present".into(),
            actual: "missing".into(),
        }
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn length_out_of_range(
        field: impl Into<String>,
        min: Option<usize>,
        max: Option<usize>,
        actual: usize,
    ) -> Self {
        let expected = match (min, max) {
            (Some(lo), Some(hi)) => format!("string length in {}..={}", lo, hi),
            (Some(lo), None) => format!("string length >= {}", lo),
            (None, Some(hi)) => format!("string length <= {}", hi),
            (None, None) => "any string length".into(),
        };
        Self {
            field: field.into(),
            expected,
            actual: format!("length {}", actual),
        }
    }

    pub fn not_allowed(field: impl Into<String>, allowed: &[String], actual: &str) -> Self {
        Self {
            field: field.into(),
            expected: format!("one of [{}]", allowed.join(", ")),
            actual: format!("'{}'", actual),
        }
    }

    pub fn pattern_mismatch(field: impl Into<String>, pattern: &str, actual: &str) -> Self {
        Self {
            field: field.into(),
            expected: format!("match for pattern '{}'", pattern),
            actual: format!("'{}'", actual),
        }
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}': expected {}, got {}",
            self.field, self.expected, self.actual
        )
    }
}

/// Schema error type with full context
#[derive(Debug)]
pub struct SchemaError {
    /// Error code
    code: SchemaErrorCode,
    /// Human-readable message
    message: String,
    /// Collection the error applies to
    collection: String,
    /// Validation details if applicable
    details: Option<ValidationDetails>,
}

impl SchemaError {
    /// Create a validation failed error
    pub fn validation_failed(collection: impl Into<String>, details: ValidationDetails) -> Self {
        Self {
            code: SchemaErrorCode::ValidationFailed,
            message: format!("Document validation failed: {}", details),
            collection: collection.into(),
            details: Some(details),
        }
    }

    /// Create a bad validator error
    pub fn bad_validator(collection: impl Into<String>, reason: impl Into<String>) -> Self {
        let collection = collection.into();
        Self {
            code: SchemaErrorCode::BadValidator,
            message: format!(
                "Malformed validator for collection '{}': {}",
                collection,
                reason.into()
            ),
            collection,
            details: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
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

    /// Returns the collection the error applies to
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns validation details if applicable
    pub fn details(&self) -> Option<&ValidationDetails> {
        self.details.as_ref()
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} (collection '{}')",
            self.code.severity(),
            self.code.code(),
            self.message,
            self.collection
        )
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
