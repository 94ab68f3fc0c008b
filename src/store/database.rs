//! The database: named collections plus optional metadata backing
//!
//! Schema changes (create_collection, create_index) are persisted to the
//! metadata directory when the database is disk-backed, so a later process
//! sees the same schema state. Documents are held in memory only.

use serde_json::Value;
use std::path::Path;

use crate::catalog::{CollectionSpec, IndexSpec, ValidatorSpec};
use crate::index::Ensured;
use crate::init::{Applied, InitError, SchemaTarget};

use super::collection::{Collection, ValidatorChange};
use super::errors::{StoreError, StoreResult};
use super::meta::MetaStore;

/// Outcome of ensuring a collection exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionChange {
    /// Collection was created
    Created,
    /// Collection existed with the declared validator
    Unchanged,
    /// Collection existed; its validator was replaced by the declared one
    ValidatorReplaced,
}

/// A named document database.
pub struct Database {
    name: String,
    collections: Vec<Collection>,
    meta: Option<MetaStore>,
}

impl Database {
    /// Creates an empty in-memory database.
    pub fn in_memory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: Vec::new(),
            meta: None,
        }
    }

    /// Opens a disk-backed database, restoring persisted collection specs.
    pub fn open(name: impl Into<String>, data_dir: &Path) -> StoreResult<Self> {
        let meta = MetaStore::new(data_dir);
        let specs = meta.load_all()?;

        let mut db = Self {
            name: name.into(),
            collections: Vec::new(),
            meta: None,
        };

        for spec in &specs {
            db.create_collection(&spec.name, spec.validator.as_ref())?;
            for index in &spec.indexes {
                db.create_index(&spec.name, index)?;
            }
        }

        db.meta = Some(meta);
        Ok(db)
    }

    /// Database name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of existing collections, in creation order.
    pub fn collection_names(&self) -> Vec<&str> {
        self.collections.iter().map(Collection::name).collect()
    }

    /// Returns a collection by name.
    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name() == name)
    }

    fn collection_mut(&mut self, name: &str) -> Option<&mut Collection> {
        self.collections.iter_mut().find(|c| c.name() == name)
    }

    fn require_mut(&mut self, name: &str) -> StoreResult<&mut Collection> {
        self.collections
            .iter_mut()
            .find(|c| c.name() == name)
            .ok_or_else(|| StoreError::UnknownCollection(name.to_string()))
    }

    fn persist(&self, name: &str) -> StoreResult<()> {
        if let (Some(meta), Some(coll)) = (&self.meta, self.collection(name)) {
            meta.save(&coll.to_spec())?;
        }
        Ok(())
    }

    /// Ensures a collection exists with the declared validator.
    ///
    /// An existing collection with a matching validator is left alone; a
    /// differing validator is replaced by the declared one (documents are
    /// not re-validated).
    pub fn create_collection(
        &mut self,
        name: &str,
        validator: Option<&ValidatorSpec>,
    ) -> StoreResult<CollectionChange> {
        let change = match self.collection_mut(name) {
            Some(coll) => match coll.set_validator(validator)? {
                ValidatorChange::Unchanged => CollectionChange::Unchanged,
                ValidatorChange::Replaced => CollectionChange::ValidatorReplaced,
            },
            None => {
                let coll = Collection::create(name, validator)?;
                self.collections.push(coll);
                CollectionChange::Created
            }
        };

        if change != CollectionChange::Unchanged {
            self.persist(name)?;
        }
        Ok(change)
    }

    /// Ensures an index exists, creating the collection implicitly when
    /// absent (document-database createIndex semantics).
    pub fn create_index(&mut self, collection: &str, spec: &IndexSpec) -> StoreResult<Ensured> {
        if self.collection(collection).is_none() {
            self.create_collection(collection, None)?;
        }

        let ensured = self.require_mut(collection)?.ensure_index(spec)?;
        if ensured == Ensured::Created {
            self.persist(collection)?;
        }
        Ok(ensured)
    }

    /// Inserts a document, subject to the collection's validator and
    /// unique indexes. Returns the document id.
    pub fn insert(&mut self, collection: &str, document: Value) -> StoreResult<String> {
        self.require_mut(collection)?.insert(document)
    }

    /// Returns a stored document by id.
    pub fn get(&self, collection: &str, doc_id: &str) -> Option<&Value> {
        self.collection(collection)?.get(doc_id)
    }

    /// Deletes a document. Returns whether one was removed.
    pub fn delete(&mut self, collection: &str, doc_id: &str) -> StoreResult<bool> {
        Ok(self.require_mut(collection)?.delete(doc_id))
    }

    /// Equality lookup through a single-field index.
    pub fn find_by(&self, collection: &str, field: &str, value: &Value) -> Vec<&Value> {
        self.collection(collection)
            .map(|c| c.find_by(field, value))
            .unwrap_or_default()
    }

    /// Current schema state of every collection.
    pub fn schema_state(&self) -> Vec<CollectionSpec> {
        self.collections.iter().map(Collection::to_spec).collect()
    }
}

impl SchemaTarget for Database {
    fn ensure_collection(&mut self, spec: &CollectionSpec) -> Result<Applied, InitError> {
        match self.create_collection(&spec.name, spec.validator.as_ref()) {
            Ok(CollectionChange::Created) => Ok(Applied::Created),
            Ok(CollectionChange::Unchanged) => Ok(Applied::Unchanged),
            Ok(CollectionChange::ValidatorReplaced) => Ok(Applied::Updated),
            Err(e) => Err(init_error(&spec.name, None, e)),
        }
    }

    fn ensure_index(&mut self, collection: &str, spec: &IndexSpec) -> Result<Applied, InitError> {
        match self.create_index(collection, spec) {
            Ok(Ensured::Created) => Ok(Applied::Created),
            Ok(Ensured::Unchanged) => Ok(Applied::Unchanged),
            Err(e) => Err(init_error(collection, Some(&spec.name()), e)),
        }
    }
}

/// Maps store failures onto the initializer's error taxonomy.
fn init_error(collection: &str, index: Option<&str>, err: StoreError) -> InitError {
    match err {
        StoreError::Schema(e) => InitError::ValidatorRejected {
            collection: collection.to_string(),
            reason: e.message().to_string(),
        },
        StoreError::Index(e) => InitError::IndexConflict {
            collection: collection.to_string(),
            index: index.unwrap_or_else(|| e.index()).to_string(),
            reason: e.message().to_string(),
        },
        StoreError::Meta { path, reason } => {
            InitError::Connection(format!("metadata at '{}': {}", path, reason))
        }
        StoreError::UnknownCollection(name) => {
            InitError::Connection(format!("collection '{}' disappeared during run", name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FieldRule;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_create_collection_twice_is_noop() {
        let mut db = Database::in_memory("training_platform");

        assert_eq!(
            db.create_collection("reps", None).unwrap(),
            CollectionChange::Created
        );
        assert_eq!(
            db.create_collection("reps", None).unwrap(),
            CollectionChange::Unchanged
        );
        assert_eq!(db.collection_names(), vec!["reps"]);
    }

    #[test]
    fn test_differing_validator_is_replaced() {
        let mut db = Database::in_memory("training_platform");
        db.create_collection("companies", None).unwrap();

        let validator = ValidatorSpec::new(&["name"], vec![("name", FieldRule::string())]);
        assert_eq!(
            db.create_collection("companies", Some(&validator)).unwrap(),
            CollectionChange::ValidatorReplaced
        );
        assert_eq!(
            db.create_collection("companies", Some(&validator)).unwrap(),
            CollectionChange::Unchanged
        );
    }

    #[test]
    fn test_create_index_creates_missing_collection() {
        let mut db = Database::in_memory("training_platform");

        let ensured = db
            .create_index("training_modules", &IndexSpec::on(&["journeyId"]))
            .unwrap();
        assert_eq!(ensured, Ensured::Created);
        assert!(db.collection("training_modules").is_some());
    }

    #[test]
    fn test_insert_into_unknown_collection_fails() {
        let mut db = Database::in_memory("training_platform");
        let result = db.insert("nowhere", json!({"x": 1}));
        assert!(matches!(result, Err(StoreError::UnknownCollection(_))));
    }

    #[test]
    fn test_schema_survives_reopen() {
        let tmp = TempDir::new().unwrap();

        {
            let mut db = Database::open("training_platform", tmp.path()).unwrap();
            let validator = ValidatorSpec::new(&["name"], vec![("name", FieldRule::string())]);
            db.create_collection("companies", Some(&validator)).unwrap();
            db.create_index("reps", &IndexSpec::unique(&["userId"])).unwrap();
        }

        let db = Database::open("training_platform", tmp.path()).unwrap();
        assert!(db.collection("companies").unwrap().validator_spec().is_some());
        assert_eq!(
            db.collection("reps").unwrap().index_specs(),
            vec![&IndexSpec::unique(&["userId"])]
        );
    }

    #[test]
    fn test_documents_do_not_survive_reopen() {
        let tmp = TempDir::new().unwrap();

        {
            let mut db = Database::open("training_platform", tmp.path()).unwrap();
            db.create_collection("reps", None).unwrap();
            db.insert("reps", json!({"_id": "r1"})).unwrap();
        }

        let db = Database::open("training_platform", tmp.path()).unwrap();
        assert!(db.collection("reps").unwrap().is_empty());
    }
}
