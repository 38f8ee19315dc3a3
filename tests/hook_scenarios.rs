//! Hook Scenario Tests
//!
//! End-to-end writes through the in-memory store with the no-update
//! hook installed, using schemas loaded from disk.

use noupdate::hook::{self, HookOptions, SetupError};
use noupdate::schema::SchemaLoader;
use noupdate::store::{MemoryStore, StoreError};
use noupdate::{EnforcerOptions, ViolationKind};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_schemas(dir: &std::path::Path) {
    fs::write(
        dir.join("model_1.json"),
        r#"{ "model": "Model_1", "fields": { "id": {}, "attr1": {}, "attr2": {}, "attr3": {} } }"#,
    )
    .unwrap();
    fs::write(
        dir.join("model_2.json"),
        r#"{
            "model": "Model_2",
            "fields": {
                "id": {},
                "attr1": { "noUpdate": true },
                "attr2": { "noUpdate": false },
                "attr3": {}
            }
        }"#,
    )
    .unwrap();
    fs::write(
        dir.join("model_3.json"),
        r#"{
            "model": "Model_3",
            "fields": {
                "id": {},
                "attr1": { "noUpdate": { "readOnly": true } },
                "attr2": { "noUpdate": false },
                "attr3": {}
            }
        }"#,
    )
    .unwrap();
}

fn setup_store() -> (TempDir, MemoryStore) {
    let tmp = TempDir::new().unwrap();
    write_schemas(tmp.path());

    let mut loader = SchemaLoader::new(tmp.path());
    loader.load_all().unwrap();

    let mut store = MemoryStore::from_loader(&loader).unwrap();
    hook::install(Some(&mut store)).unwrap();
    (tmp, store)
}

fn full_record() -> Vec<(&'static str, serde_json::Value)> {
    vec![
        ("attr1", json!("alice")),
        ("attr2", json!("bob")),
        ("attr3", json!("carol")),
    ]
}

// =============================================================================
// Setup Tests
// =============================================================================

/// Installing without a host fails before anything is registered.
#[test]
fn test_install_without_host() {
    let result = hook::install::<MemoryStore>(None);
    assert_eq!(result.err(), Some(SetupError::MissingHost));
}

/// Installing returns the host for chaining.
#[test]
fn test_install_returns_host() {
    let mut store = MemoryStore::new();
    let returned = hook::install(Some(&mut store)).unwrap();
    assert_eq!(returned.hook_count(), 1);
}

// =============================================================================
// Scenario Tests
// =============================================================================

/// Models without declarations accept any update.
#[test]
fn test_undeclared_model_allows_updates() {
    let (_tmp, mut store) = setup_store();
    let record = store.create("Model_1", full_record()).unwrap();

    let updated = store
        .update("Model_1", record.id, [("attr1", json!("david"))], HookOptions::default())
        .unwrap();
    assert_eq!(updated.get("attr1"), Some(&json!("david")));
}

/// `noUpdate: false` and undeclared fields stay mutable.
#[test]
fn test_mutable_fields_on_declared_model() {
    let (_tmp, mut store) = setup_store();
    let record = store.create("Model_2", full_record()).unwrap();

    store
        .update("Model_2", record.id, [("attr3", json!("david"))], HookOptions::default())
        .unwrap();
    store
        .update("Model_2", record.id, [("attr2", json!("david"))], HookOptions::default())
        .unwrap();
}

/// No-update field with a value cannot change; other fields still can.
#[test]
fn test_no_update_scenario() {
    let (_tmp, mut store) = setup_store();
    let record = store.create("Model_2", [("attr1", json!("a"))]).unwrap();

    let err = store
        .update("Model_2", record.id, [("attr1", json!("b"))], HookOptions::default())
        .unwrap_err();
    let validation = err.validation().unwrap();
    assert_eq!(validation.violations().len(), 1);
    assert_eq!(validation.violations()[0].kind, ViolationKind::NoUpdate);
    assert!(err
        .to_string()
        .contains("`attr1` cannot be updated due `noUpdate` constraint"));

    let updated = store
        .update("Model_2", record.id, [("attr2", json!("x"))], HookOptions::default())
        .unwrap();
    assert_eq!(updated.get("attr1"), Some(&json!("a")));
    assert_eq!(updated.get("attr2"), Some(&json!("x")));
}

/// A no-update field left unset at creation can be assigned once.
#[test]
fn test_no_update_lazy_assignment() {
    let (_tmp, mut store) = setup_store();
    let record = store.create("Model_2", [("attr3", json!("c"))]).unwrap();

    store
        .update("Model_2", record.id, [("attr1", json!("first"))], HookOptions::default())
        .unwrap();
    let err = store
        .update("Model_2", record.id, [("attr1", json!("second"))], HookOptions::default())
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
}

/// Read-only field is blocked even though it was never set.
#[test]
fn test_read_only_scenario() {
    let (_tmp, mut store) = setup_store();
    let record = store.create("Model_3", [("attr2", json!("b"))]).unwrap();

    let err = store
        .update("Model_3", record.id, [("attr1", json!("x"))], HookOptions::default())
        .unwrap_err();
    let validation = err.validation().unwrap();
    assert_eq!(validation.violations()[0].kind, ViolationKind::ReadOnly);
    assert!(err
        .to_string()
        .contains("attr1` cannot be updated due `noUpdate:readOnly` constraint"));
}

/// Both offending fields of one write are reported together.
#[test]
fn test_multiple_offending_fields() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("model_4.json"),
        r#"{
            "model": "Model_4",
            "fields": {
                "id": {},
                "sku": { "noUpdate": true },
                "owner": { "noUpdate": { "readOnly": true } },
                "note": {}
            }
        }"#,
    )
    .unwrap();
    let mut loader = SchemaLoader::new(tmp.path());
    loader.load_all().unwrap();
    let mut store = MemoryStore::from_loader(&loader).unwrap();
    hook::install(Some(&mut store)).unwrap();

    let record = store
        .create("Model_4", [("sku", json!("S-1")), ("owner", json!("o"))])
        .unwrap();
    let err = store
        .update(
            "Model_4",
            record.id,
            [
                ("owner", json!("p")),
                ("note", json!("n")),
                ("sku", json!("S-2")),
            ],
            HookOptions::default(),
        )
        .unwrap_err();

    assert_eq!(err.validation().unwrap().fields(), vec!["owner", "sku"]);
}

/// Skipping validation for an operation disables the hook.
#[test]
fn test_skip_validation() {
    let (_tmp, mut store) = setup_store();
    let record = store.create("Model_3", full_record()).unwrap();

    let updated = store
        .update(
            "Model_3",
            record.id,
            [("attr1", json!("x"))],
            HookOptions::skip_validation(),
        )
        .unwrap();
    assert_eq!(updated.get("attr1"), Some(&json!("x")));
}

/// Explicit null prior values block updates when configured to.
#[test]
fn test_null_as_set_hook() {
    let tmp = TempDir::new().unwrap();
    write_schemas(tmp.path());
    let mut loader = SchemaLoader::new(tmp.path());
    loader.load_all().unwrap();

    let mut store = MemoryStore::from_loader(&loader).unwrap();
    hook::install_with(
        Some(&mut store),
        EnforcerOptions {
            treat_null_as_set: true,
        },
    )
    .unwrap();

    let record = store
        .create("Model_2", [("attr1", serde_json::Value::Null)])
        .unwrap();
    let err = store
        .update("Model_2", record.id, [("attr1", json!("x"))], HookOptions::default())
        .unwrap_err();
    assert!(err.validation().is_some());
}
