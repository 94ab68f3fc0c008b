//! Index manager for one collection
//!
//! Holds every index the catalog declares for the collection. Writes go
//! through a check pass first, so a rejected document leaves no trace in
//! any index.
//!
//! # API
//!
//! - `ensure(spec, docs)` - Ensure an index exists, building it over existing documents
//! - `check_insert(doc_id, doc)` - Reject unique violations before a write
//! - `apply_insert(doc_id, doc)` / `apply_delete(doc_id, doc)` - Keep entries in step with the store
//! - `lookup_eq(field, value)` - Equality lookup through a single-field index

use std::collections::BTreeMap;

use serde_json::Value;

use crate::catalog::IndexSpec;

use super::errors::{IndexError, IndexResult};
use super::key::IndexKey;

/// One index: its declaration plus its entries.
///
/// Entries map a composite key to the sorted ids of documents bearing it.
struct IndexState {
    spec: IndexSpec,
    entries: BTreeMap<Vec<IndexKey>, Vec<String>>,
}

impl IndexState {
    fn new(spec: IndexSpec) -> Self {
        Self {
            spec,
            entries: BTreeMap::new(),
        }
    }

    fn insert(&mut self, key: Vec<IndexKey>, doc_id: &str) {
        let ids = self.entries.entry(key).or_default();
        if let Err(pos) = ids.binary_search(&doc_id.to_string()) {
            ids.insert(pos, doc_id.to_string());
        }
    }

    fn remove(&mut self, key: &[IndexKey], doc_id: &str) {
        if let Some(ids) = self.entries.get_mut(key) {
            if let Ok(pos) = ids.binary_search(&doc_id.to_string()) {
                ids.remove(pos);
            }
            if ids.is_empty() {
                self.entries.remove(key);
            }
        }
    }
}

/// Outcome of an ensure call: did the target change?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ensured {
    /// Index was created and built
    Created,
    /// An identical index already existed
    Unchanged,
}

/// Maintains all declared indexes for one collection.
pub struct IndexManager {
    collection: String,
    indexes: Vec<IndexState>,
}

impl IndexManager {
    /// Creates an empty manager for the named collection.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            indexes: Vec::new(),
        }
    }

    /// Ensures an index exists, building it over the documents already in
    /// the collection.
    ///
    /// - Identical index already present: no-op.
    /// - Same key fields with a different unique flag: TRAIN_INDEX_CONFLICT.
    /// - Unique build finding duplicate keys: TRAIN_INDEX_CONFLICT naming
    ///   the duplicated key; the index is not retained.
    pub fn ensure<'a, I>(&mut self, spec: &IndexSpec, docs: I) -> IndexResult<Ensured>
    where
        I: Iterator<Item = (&'a String, &'a Value)>,
    {
        if let Some(existing) = self.indexes.iter().find(|i| i.spec.same_fields(spec)) {
            if existing.spec == *spec {
                return Ok(Ensured::Unchanged);
            }
            return Err(IndexError::conflict(
                &self.collection,
                spec.name(),
                format!(
                    "existing index over the same fields has unique={}",
                    existing.spec.unique
                ),
            ));
        }

        let mut state = IndexState::new(spec.clone());
        for (doc_id, doc) in docs {
            let key = IndexKey::extract(doc, &spec.fields);
            if spec.unique {
                if let Some(ids) = state.entries.get(&key) {
                    if !ids.is_empty() {
                        return Err(IndexError::conflict(
                            &self.collection,
                            spec.name(),
                            format!(
                                "existing documents contain duplicate key {}",
                                IndexKey::render(&key)
                            ),
                        ));
                    }
                }
            }
            state.insert(key, doc_id);
        }

        self.indexes.push(state);
        Ok(Ensured::Created)
    }

    /// Rejects the insert if any unique index already holds its key.
    ///
    /// Must run before the document is stored; on error nothing changed.
    pub fn check_insert(&self, doc_id: &str, doc: &Value) -> IndexResult<()> {
        for index in &self.indexes {
            if !index.spec.unique {
                continue;
            }
            let key = IndexKey::extract(doc, &index.spec.fields);
            if let Some(ids) = index.entries.get(&key) {
                if ids.iter().any(|id| id != doc_id) {
                    return Err(IndexError::duplicate_key(
                        &self.collection,
                        index.spec.name(),
                        IndexKey::render(&key),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Adds a stored document to every index. Called after the store write.
    pub fn apply_insert(&mut self, doc_id: &str, doc: &Value) {
        for index in &mut self.indexes {
            let key = IndexKey::extract(doc, &index.spec.fields);
            index.insert(key, doc_id);
        }
    }

    /// Removes a document from every index. Called after the store delete.
    pub fn apply_delete(&mut self, doc_id: &str, doc: &Value) {
        for index in &mut self.indexes {
            let key = IndexKey::extract(doc, &index.spec.fields);
            index.remove(&key, doc_id);
        }
    }

    /// Equality lookup through a single-field index over `field`.
    ///
    /// Returns matching document ids sorted ascending; empty when no such
    /// index exists.
    pub fn lookup_eq(&self, field: &str, value: &Value) -> Vec<String> {
        let Some(index) = self
            .indexes
            .iter()
            .find(|i| i.spec.fields.len() == 1 && i.spec.fields[0] == field)
        else {
            return Vec::new();
        };

        let key = vec![IndexKey::from_json(value)];
        index.entries.get(&key).cloned().unwrap_or_default()
    }

    /// Declared index specs, in declaration order.
    pub fn specs(&self) -> Vec<&IndexSpec> {
        self.indexes.iter().map(|i| &i.spec).collect()
    }

    /// Whether an identical index is already present.
    pub fn contains(&self, spec: &IndexSpec) -> bool {
        self.indexes.iter().any(|i| i.spec == *spec)
    }
}
