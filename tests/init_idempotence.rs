//! Initialization Idempotence Tests
//!
//! Re-running the bootstrap must be a safe no-op:
//! - second run over the same in-memory database reports nothing created
//! - final schema state after two runs equals the state after one
//! - a disk-backed database reopened in a new "process" is also a no-op
//! - a run over a partially-initialized database completes the missing parts

use serde_json::json;
use traindb::catalog::training_platform;
use traindb::init::initialize;
use traindb::store::Database;

use tempfile::TempDir;

#[test]
fn test_second_run_is_noop() {
    let mut db = Database::in_memory("training_platform");

    let first = initialize(&training_platform(), &mut db).unwrap();
    assert_eq!(first.collections_created, 6);
    assert_eq!(first.indexes_created, 6);
    assert!(!first.is_noop());

    let second = initialize(&training_platform(), &mut db).unwrap();
    assert!(second.is_noop());
    assert_eq!(second.collections_unchanged, 6);
    assert_eq!(second.indexes_unchanged, 6);
}

#[test]
fn test_double_run_same_final_state() {
    let catalog = training_platform();

    let mut once = Database::in_memory("training_platform");
    initialize(&catalog, &mut once).unwrap();

    let mut twice = Database::in_memory("training_platform");
    initialize(&catalog, &mut twice).unwrap();
    initialize(&catalog, &mut twice).unwrap();

    assert_eq!(once.schema_state(), twice.schema_state());
}

#[test]
fn test_rerun_preserves_documents_and_constraints() {
    let mut db = Database::in_memory("training_platform");
    let catalog = training_platform();
    initialize(&catalog, &mut db).unwrap();

    db.insert(
        "users",
        json!({"name": "Alice", "email": "a@b.com", "password": "12345678", "role": "admin"}),
    )
    .unwrap();

    initialize(&catalog, &mut db).unwrap();

    // Document survived and uniqueness still holds
    assert_eq!(db.collection("users").unwrap().len(), 1);
    assert!(db
        .insert(
            "users",
            json!({"name": "Bob", "email": "a@b.com", "password": "12345678", "role": "admin"}),
        )
        .is_err());
}

#[test]
fn test_reopen_and_rerun_is_noop() {
    let tmp = TempDir::new().unwrap();
    let catalog = training_platform();

    {
        let mut db = Database::open("training_platform", tmp.path()).unwrap();
        let report = initialize(&catalog, &mut db).unwrap();
        assert!(!report.is_noop());
    }

    // New process, same data directory
    let mut db = Database::open("training_platform", tmp.path()).unwrap();
    let report = initialize(&catalog, &mut db).unwrap();
    assert!(report.is_noop());
}

#[test]
fn test_partial_schema_gets_completed() {
    let mut db = Database::in_memory("training_platform");
    db.create_collection("users", None).unwrap();
    db.create_collection("reps", None).unwrap();

    let report = initialize(&training_platform(), &mut db).unwrap();

    // users gained its validator, reps stayed as-is, the rest were created
    assert_eq!(report.collections_created, 4);
    assert_eq!(report.collections_updated, 1);
    assert_eq!(report.collections_unchanged, 1);
    assert_eq!(report.indexes_created, 6);

    assert!(db.collection("users").unwrap().validator_spec().is_some());
}

#[test]
fn test_foreign_collections_left_alone() {
    let mut db = Database::in_memory("training_platform");
    db.create_collection("audit_log", None).unwrap();

    initialize(&training_platform(), &mut db).unwrap();

    assert!(db.collection("audit_log").is_some());
    assert_eq!(db.collection_names().len(), 7);
}
