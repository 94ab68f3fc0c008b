//! Metadata directory for disk-backed databases
//!
//! Collection specs are stored at `<data_dir>/metadata/collections/`, one
//! JSON file per collection. Only schema is persisted; documents never
//! touch disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::CollectionSpec;

use super::errors::{StoreError, StoreResult};

/// Reads and writes collection specs under a data directory.
pub struct MetaStore {
    dir: PathBuf,
}

impl MetaStore {
    /// Creates a metadata store rooted at the given data directory.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            dir: data_dir.join("metadata").join("collections"),
        }
    }

    /// Returns the collections directory path.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Loads every persisted collection spec.
    ///
    /// A missing directory is an empty database, not an error. Malformed
    /// files fail the load.
    pub fn load_all(&self) -> StoreResult<Vec<CollectionSpec>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| {
            StoreError::meta(self.dir.display().to_string(), format!("read_dir failed: {}", e))
        })?;

        let mut specs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                StoreError::meta(self.dir.display().to_string(), format!("bad entry: {}", e))
            })?;
            let path = entry.path();

            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }

            let content = fs::read_to_string(&path).map_err(|e| {
                StoreError::meta(path.display().to_string(), format!("read failed: {}", e))
            })?;

            let spec: CollectionSpec = serde_json::from_str(&content).map_err(|e| {
                StoreError::meta(path.display().to_string(), format!("invalid JSON: {}", e))
            })?;

            specs.push(spec);
        }

        // Directory iteration order is platform-dependent
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(specs)
    }

    /// Persists one collection spec, replacing any previous version.
    pub fn save(&self, spec: &CollectionSpec) -> StoreResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            StoreError::meta(
                self.dir.display().to_string(),
                format!("create_dir_all failed: {}", e),
            )
        })?;

        let path = self.dir.join(format!("{}.json", spec.name));
        let content = serde_json::to_string_pretty(spec).map_err(|e| {
            StoreError::meta(path.display().to_string(), format!("serialize failed: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            StoreError::meta(path.display().to_string(), format!("write failed: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FieldRule, IndexSpec, ValidatorSpec};
    use tempfile::TempDir;

    fn sample_spec() -> CollectionSpec {
        CollectionSpec::validated(
            "users",
            ValidatorSpec::new(&["email"], vec![("email", FieldRule::string())]),
        )
        .with_index(IndexSpec::unique(&["email"]))
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let meta = MetaStore::new(tmp.path());

        meta.save(&sample_spec()).unwrap();
        meta.save(&CollectionSpec::plain("reps")).unwrap();

        let loaded = meta.load_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].name, "reps");
        assert_eq!(loaded[1], sample_spec());
    }

    #[test]
    fn test_save_replaces_previous_version() {
        let tmp = TempDir::new().unwrap();
        let meta = MetaStore::new(tmp.path());

        meta.save(&CollectionSpec::plain("users")).unwrap();
        meta.save(&sample_spec()).unwrap();

        let loaded = meta.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded[0].validator.is_some());
    }

    #[test]
    fn test_missing_directory_loads_empty() {
        let tmp = TempDir::new().unwrap();
        let meta = MetaStore::new(tmp.path());
        assert!(meta.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_file_fails_load() {
        let tmp = TempDir::new().unwrap();
        let meta = MetaStore::new(tmp.path());
        meta.save(&sample_spec()).unwrap();

        std::fs::write(meta.dir().join("broken.json"), "not json").unwrap();

        let result = meta.load_all();
        assert!(matches!(result, Err(StoreError::Meta { .. })));
    }

    #[test]
    fn test_non_json_files_ignored() {
        let tmp = TempDir::new().unwrap();
        let meta = MetaStore::new(tmp.path());
        meta.save(&sample_spec()).unwrap();

        std::fs::write(meta.dir().join("README.txt"), "notes").unwrap();

        assert_eq!(meta.load_all().unwrap().len(), 1);
    }
}
