//! Document validator compiled from a `ValidatorSpec`
//!
//! Validation semantics:
//! - Document root must be an object
//! - Required fields must be present and non-null
//! - A declared field, when present, must match its declared type
//! - String rules (length bounds, enum membership, pattern) apply on top
//! - Undeclared fields pass through unchecked (open schema)
//!
//! The spec is sanity-checked and its pattern compiled once, at bootstrap
//! time; write-time validation never re-parses rules.

use regex::Regex;
use serde_json::Value;

use crate::catalog::{FieldRule, FieldType, ValidatorSpec};

use super::errors::{SchemaError, SchemaResult, ValidationDetails};

/// A single compiled field rule
#[derive(Debug)]
struct CompiledRule {
    field: String,
    field_type: FieldType,
    min_length: Option<usize>,
    max_length: Option<usize>,
    allowed: Option<Vec<String>>,
    pattern: Option<(String, Regex)>,
}

/// Compiled, write-time form of a collection validator.
#[derive(Debug)]
pub struct DocumentValidator {
    collection: String,
    required: Vec<String>,
    rules: Vec<CompiledRule>,
}

impl DocumentValidator {
    /// Compiles a validator spec for the named collection.
    ///
    /// # Errors
    ///
    /// Returns `TRAIN_SCHEMA_BAD_VALIDATOR` if:
    /// - a pattern fails to compile
    /// - min_length exceeds max_length
    /// - an enum is declared empty
    /// - string-only rules are attached to a non-string field
    pub fn compile(collection: &str, spec: &ValidatorSpec) -> SchemaResult<Self> {
        let mut rules = Vec::with_capacity(spec.fields.len());

        for (field, rule) in &spec.fields {
            Self::check_rule(collection, field, rule)?;

            let pattern = match &rule.pattern {
                Some(p) => {
                    let regex = Regex::new(p).map_err(|e| {
                        SchemaError::bad_validator(
                            collection,
                            format!("field '{}': invalid pattern: {}", field, e),
                        )
                    })?;
                    Some((p.clone(), regex))
                }
                None => None,
            };

            rules.push(CompiledRule {
                field: field.clone(),
                field_type: rule.field_type,
                min_length: rule.min_length,
                max_length: rule.max_length,
                allowed: rule.allowed.clone(),
                pattern,
            });
        }

        Ok(Self {
            collection: collection.to_string(),
            required: spec.required.clone(),
            rules,
        })
    }

    /// Rejects rule combinations the validator cannot enforce.
    fn check_rule(collection: &str, field: &str, rule: &FieldRule) -> SchemaResult<()> {
        if rule.field_type != FieldType::String {
            if rule.min_length.is_some() || rule.max_length.is_some() {
                return Err(SchemaError::bad_validator(
                    collection,
                    format!("field '{}': length bounds on a non-string field", field),
                ));
            }
            if rule.allowed.is_some() {
                return Err(SchemaError::bad_validator(
                    collection,
                    format!("field '{}': enum on a non-string field", field),
                ));
            }
            if rule.pattern.is_some() {
                return Err(SchemaError::bad_validator(
                    collection,
                    format!("field '{}': pattern on a non-string field", field),
                ));
            }
        }

        if let (Some(lo), Some(hi)) = (rule.min_length, rule.max_length) {
            if lo > hi {
                return Err(SchemaError::bad_validator(
                    collection,
                    format!("field '{}': min_length {} exceeds max_length {}", field, lo, hi),
                ));
            }
        }

        if let Some(allowed) = &rule.allowed {
            if allowed.is_empty() {
                return Err(SchemaError::bad_validator(
                    collection,
                    format!("field '{}': empty enum", field),
                ));
            }
        }

        Ok(())
    }

    /// Returns the collection this validator guards.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Validates a document against the compiled rules.
    pub fn validate(&self, document: &Value) -> SchemaResult<()> {
        let obj = document.as_object().ok_or_else(|| {
            SchemaError::validation_failed(
                &self.collection,
                ValidationDetails::type_mismatch("$root", "object", json_type_name(document)),
            )
        })?;

        // Required fields: present and non-null
        for field in &self.required {
            match obj.get(field) {
                None => {
                    return Err(SchemaError::validation_failed(
                        &self.collection,
                        ValidationDetails::missing_field(field),
                    ))
                }
                Some(Value::Null) => {
                    return Err(SchemaError::validation_failed(
                        &self.collection,
                        ValidationDetails::new(field, "non-null value", "null"),
                    ))
                }
                Some(_) => {}
            }
        }

        // Declared fields: checked whenever present
        for rule in &self.rules {
            let Some(value) = obj.get(&rule.field) else {
                continue;
            };
            if value.is_null() {
                // Optional null slips past the required check above; the
                // type check still rejects it.
                return Err(SchemaError::validation_failed(
                    &self.collection,
                    ValidationDetails::type_mismatch(
                        &rule.field,
                        rule.field_type.type_name(),
                        "null",
                    ),
                ));
            }
            self.validate_value(rule, value)?;
        }

        Ok(())
    }

    /// Validates a single present value against its rule.
    fn validate_value(&self, rule: &CompiledRule, value: &Value) -> SchemaResult<()> {
        match rule.field_type {
            FieldType::String => {
                let s = value.as_str().ok_or_else(|| self.type_error(rule, value))?;

                let len = s.chars().count();
                if rule.min_length.map_or(false, |lo| len < lo)
                    || rule.max_length.map_or(false, |hi| len > hi)
                {
                    return Err(SchemaError::validation_failed(
                        &self.collection,
                        ValidationDetails::length_out_of_range(
                            &rule.field,
                            rule.min_length,
                            rule.max_length,
                            len,
                        ),
                    ));
                }

                if let Some(allowed) = &rule.allowed {
                    if !allowed.iter().any(|a| a == s) {
                        return Err(SchemaError::validation_failed(
                            &self.collection,
                            ValidationDetails::not_allowed(&rule.field, allowed, s),
                        ));
                    }
                }

                if let Some((pattern, regex)) = &rule.pattern {
                    if !regex.is_match(s) {
                        return Err(SchemaError::validation_failed(
                            &self.collection,
                            ValidationDetails::pattern_mismatch(&rule.field, pattern, s),
                        ));
                    }
                }
            }
            FieldType::Int => {
                if !value.is_i64() && !value.is_u64() {
                    return Err(self.type_error(rule, value));
                }
            }
            FieldType::Bool => {
                if !value.is_boolean() {
                    return Err(self.type_error(rule, value));
                }
            }
            FieldType::Double => {
                if !value.is_number() {
                    return Err(self.type_error(rule, value));
                }
            }
        }

        Ok(())
    }

    fn type_error(&self, rule: &CompiledRule, value: &Value) -> SchemaError {
        SchemaError::validation_failed(
            &self.collection,
            ValidationDetails::type_mismatch(
                &rule.field,
                rule.field_type.type_name(),
                json_type_name(value),
            ),
        )
    }
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "double"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
