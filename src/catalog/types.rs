//! Declarative schema types
//!
//! A `Catalog` lists `CollectionSpec`s; each collection optionally carries a
//! `ValidatorSpec` (field rules enforced at write time) and any number of
//! `IndexSpec`s (unique or non-unique access paths).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Supported field types for validator rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// Boolean
    Bool,
    /// 64-bit floating point
    Double,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Bool => "bool",
            FieldType::Double => "double",
        }
    }
}

/// Validation rule for a single field.
///
/// Length bounds, enum membership, and pattern only apply to string fields;
/// the validator compiler rejects specs that attach them to anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Expected field type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Minimum string length (inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum string length (inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Closed set of allowed string values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
    /// Regular expression the value must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl FieldRule {
    /// Create a bare string rule
    pub fn string() -> Self {
        Self {
            field_type: FieldType::String,
            min_length: None,
            max_length: None,
            allowed: None,
            pattern: None,
        }
    }

    /// Create a bare int rule
    pub fn int() -> Self {
        Self {
            field_type: FieldType::Int,
            min_length: None,
            max_length: None,
            allowed: None,
            pattern: None,
        }
    }

    /// Create a bare bool rule
    pub fn bool() -> Self {
        Self {
            field_type: FieldType::Bool,
            min_length: None,
            max_length: None,
            allowed: None,
            pattern: None,
        }
    }

    /// Set the minimum string length
    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    /// Set the maximum string length
    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    /// Restrict the value to a closed set
    pub fn one_of(mut self, values: &[&str]) -> Self {
        self.allowed = Some(values.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Require the value to match a pattern
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }
}

/// Validator attached to a collection.
///
/// Required fields must be present and non-null on every write; declared
/// fields are checked against their rule whenever present. Undeclared
/// fields pass through (open schema).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidatorSpec {
    /// Fields that must be present on every document
    pub required: Vec<String>,
    /// Per-field rules, ordered by field name
    pub fields: BTreeMap<String, FieldRule>,
}

impl ValidatorSpec {
    /// Create a validator from required field names and their rules
    pub fn new(required: &[&str], fields: Vec<(&str, FieldRule)>) -> Self {
        Self {
            required: required.iter().map(|s| s.to_string()).collect(),
            fields: fields
                .into_iter()
                .map(|(name, rule)| (name.to_string(), rule))
                .collect(),
        }
    }
}

/// Index declaration over one or more fields of a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSpec {
    /// Key fields, in order
    pub fields: Vec<String>,
    /// Whether duplicate keys are forbidden
    pub unique: bool,
}

impl IndexSpec {
    /// Non-unique index over the given fields
    pub fn on(fields: &[&str]) -> Self {
        Self {
            fields: fields.iter().map(|s| s.to_string()).collect(),
            unique: false,
        }
    }

    /// Unique index over the given fields
    pub fn unique(fields: &[&str]) -> Self {
        Self {
            fields: fields.iter().map(|s| s.to_string()).collect(),
            unique: true,
        }
    }

    /// Canonical index name, e.g. "repId_1_journeyId_1_moduleId_1"
    pub fn name(&self) -> String {
        self.fields
            .iter()
            .map(|f| format!("{}_1", f))
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Whether this index covers the same key fields as another
    pub fn same_fields(&self, other: &IndexSpec) -> bool {
        self.fields == other.fields
    }
}

/// A collection the bootstrap must ensure exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSpec {
    /// Collection name
    pub name: String,
    /// Write-time validator, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<ValidatorSpec>,
    /// Declared indexes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<IndexSpec>,
}

impl CollectionSpec {
    /// Collection with no validator
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            validator: None,
            indexes: Vec::new(),
        }
    }

    /// Collection carrying a validator
    pub fn validated(name: impl Into<String>, validator: ValidatorSpec) -> Self {
        Self {
            name: name.into(),
            validator: Some(validator),
            indexes: Vec::new(),
        }
    }

    /// Attach an index declaration
    pub fn with_index(mut self, index: IndexSpec) -> Self {
        self.indexes.push(index);
        self
    }
}

/// The full set of collections a bootstrap run must ensure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Collections in application order
    pub collections: Vec<CollectionSpec>,
}

impl Catalog {
    /// Create a catalog from collection specs
    pub fn new(collections: Vec<CollectionSpec>) -> Self {
        Self { collections }
    }

    /// Look up a collection spec by name
    pub fn get(&self, name: &str) -> Option<&CollectionSpec> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Number of declared collections
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Whether the catalog declares no collections
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}
