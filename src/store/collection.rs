//! A single collection: documents, compiled validator, indexes
//!
//! Write order is fixed: validate, check unique indexes, then store and
//! index. Any rejection happens before the first state change.

use std::collections::BTreeMap;

use serde_json::Value;
use uuid::Uuid;

use crate::catalog::{CollectionSpec, IndexSpec, ValidatorSpec};
use crate::index::{Ensured, IndexManager};
use crate::schema::DocumentValidator;

use super::errors::{StoreError, StoreResult};

/// Outcome of setting a validator on an existing collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidatorChange {
    /// Declared validator matched the existing one
    Unchanged,
    /// Validator was attached or replaced
    Replaced,
}

/// One named collection of documents.
pub struct Collection {
    name: String,
    validator_spec: Option<ValidatorSpec>,
    validator: Option<DocumentValidator>,
    docs: BTreeMap<String, Value>,
    indexes: IndexManager,
}

impl Collection {
    /// Creates an empty collection, compiling the validator if one is declared.
    pub fn create(name: &str, validator: Option<&ValidatorSpec>) -> StoreResult<Self> {
        let compiled = match validator {
            Some(spec) => Some(DocumentValidator::compile(name, spec)?),
            None => None,
        };

        Ok(Self {
            name: name.to_string(),
            validator_spec: validator.cloned(),
            validator: compiled,
            docs: BTreeMap::new(),
            indexes: IndexManager::new(name),
        })
    }

    /// Collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared validator spec, if any.
    pub fn validator_spec(&self) -> Option<&ValidatorSpec> {
        self.validator_spec.as_ref()
    }

    /// Declared indexes, in creation order.
    pub fn index_specs(&self) -> Vec<&IndexSpec> {
        self.indexes.specs()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the collection holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Replaces the validator unless the declared spec matches the current
    /// one. Existing documents are not re-validated.
    pub(crate) fn set_validator(
        &mut self,
        validator: Option<&ValidatorSpec>,
    ) -> StoreResult<ValidatorChange> {
        if self.validator_spec.as_ref() == validator {
            return Ok(ValidatorChange::Unchanged);
        }

        self.validator = match validator {
            Some(spec) => Some(DocumentValidator::compile(&self.name, spec)?),
            None => None,
        };
        self.validator_spec = validator.cloned();
        Ok(ValidatorChange::Replaced)
    }

    /// Ensures an index exists, building it over stored documents.
    pub fn ensure_index(&mut self, spec: &IndexSpec) -> StoreResult<Ensured> {
        Ok(self.indexes.ensure(spec, self.docs.iter())?)
    }

    /// Inserts a document, assigning a UUID `_id` when the caller omits one.
    ///
    /// Returns the document id. On any rejection the collection is unchanged.
    pub fn insert(&mut self, mut document: Value) -> StoreResult<String> {
        if let Some(validator) = &self.validator {
            validator.validate(&document)?;
        }

        let doc_id = match document.get("_id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => {
                let id = Uuid::new_v4().to_string();
                if let Some(obj) = document.as_object_mut() {
                    obj.insert("_id".to_string(), Value::String(id.clone()));
                }
                id
            }
        };

        if self.docs.contains_key(&doc_id) {
            return Err(StoreError::Index(crate::index::IndexError::duplicate_key(
                &self.name,
                "_id_",
                format!("(\"{}\")", doc_id),
            )));
        }

        self.indexes.check_insert(&doc_id, &document)?;

        self.indexes.apply_insert(&doc_id, &document);
        self.docs.insert(doc_id.clone(), document);
        Ok(doc_id)
    }

    /// Returns a stored document by id.
    pub fn get(&self, doc_id: &str) -> Option<&Value> {
        self.docs.get(doc_id)
    }

    /// Deletes a document, releasing its index entries.
    ///
    /// Returns whether a document was removed.
    pub fn delete(&mut self, doc_id: &str) -> bool {
        match self.docs.remove(doc_id) {
            Some(doc) => {
                self.indexes.apply_delete(doc_id, &doc);
                true
            }
            None => false,
        }
    }

    /// Equality lookup through a single-field index.
    pub fn find_by(&self, field: &str, value: &Value) -> Vec<&Value> {
        self.indexes
            .lookup_eq(field, value)
            .iter()
            .filter_map(|id| self.docs.get(id))
            .collect()
    }

    /// Spec describing the collection's current schema state.
    pub fn to_spec(&self) -> CollectionSpec {
        CollectionSpec {
            name: self.name.clone(),
            validator: self.validator_spec.clone(),
            indexes: self.indexes.specs().into_iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FieldRule;
    use serde_json::json;

    fn users_collection() -> Collection {
        let validator = ValidatorSpec::new(
            &["name", "email"],
            vec![
                ("name", FieldRule::string().min_length(2)),
                ("email", FieldRule::string()),
            ],
        );
        let mut coll = Collection::create("users", Some(&validator)).unwrap();
        coll.ensure_index(&IndexSpec::unique(&["email"])).unwrap();
        coll
    }

    #[test]
    fn test_insert_assigns_id_when_missing() {
        let mut coll = users_collection();
        let id = coll
            .insert(json!({"name": "Alice", "email": "a@b.com"}))
            .unwrap();

        let stored = coll.get(&id).unwrap();
        assert_eq!(stored["_id"], json!(id));
        assert_eq!(coll.len(), 1);
    }

    #[test]
    fn test_insert_keeps_caller_id() {
        let mut coll = users_collection();
        let id = coll
            .insert(json!({"_id": "u1", "name": "Alice", "email": "a@b.com"}))
            .unwrap();
        assert_eq!(id, "u1");
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut coll = users_collection();
        coll.insert(json!({"_id": "u1", "name": "Alice", "email": "a@b.com"}))
            .unwrap();

        let result = coll.insert(json!({"_id": "u1", "name": "Bob", "email": "b@c.com"}));
        assert!(matches!(result, Err(StoreError::Index(_))));
        assert_eq!(coll.len(), 1);
    }

    #[test]
    fn test_rejected_insert_leaves_collection_unchanged() {
        let mut coll = users_collection();
        coll.insert(json!({"name": "Alice", "email": "a@b.com"})).unwrap();

        // Validator rejection
        assert!(coll.insert(json!({"name": "B", "email": "b@c.com"})).is_err());
        // Unique rejection
        assert!(coll.insert(json!({"name": "Bob", "email": "a@b.com"})).is_err());

        assert_eq!(coll.len(), 1);
        // The rejected email left no index entry behind
        coll.insert(json!({"name": "Bob", "email": "b@c.com"})).unwrap();
    }

    #[test]
    fn test_delete_releases_unique_key() {
        let mut coll = users_collection();
        let id = coll
            .insert(json!({"name": "Alice", "email": "a@b.com"}))
            .unwrap();

        assert!(coll.delete(&id));
        assert!(!coll.delete(&id));

        coll.insert(json!({"name": "Anna", "email": "a@b.com"})).unwrap();
    }

    #[test]
    fn test_find_by_indexed_field() {
        let mut coll = Collection::create("training_journeys", None).unwrap();
        coll.ensure_index(&IndexSpec::on(&["companyId"])).unwrap();

        coll.insert(json!({"_id": "j1", "companyId": "c1"})).unwrap();
        coll.insert(json!({"_id": "j2", "companyId": "c1"})).unwrap();
        coll.insert(json!({"_id": "j3", "companyId": "c2"})).unwrap();

        let hits = coll.find_by("companyId", &json!("c1"));
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_set_validator_detects_no_change() {
        let validator = ValidatorSpec::new(&["name"], vec![("name", FieldRule::string())]);
        let mut coll = Collection::create("companies", Some(&validator)).unwrap();

        assert_eq!(
            coll.set_validator(Some(&validator)).unwrap(),
            ValidatorChange::Unchanged
        );

        let stricter = ValidatorSpec::new(
            &["name"],
            vec![("name", FieldRule::string().min_length(2))],
        );
        assert_eq!(
            coll.set_validator(Some(&stricter)).unwrap(),
            ValidatorChange::Replaced
        );

        // New validator enforced on subsequent writes
        assert!(coll.insert(json!({"name": "X"})).is_err());
    }

    #[test]
    fn test_to_spec_reflects_current_state() {
        let coll = users_collection();
        let spec = coll.to_spec();

        assert_eq!(spec.name, "users");
        assert!(spec.validator.is_some());
        assert_eq!(spec.indexes, vec![IndexSpec::unique(&["email"])]);
    }
}
