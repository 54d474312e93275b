use sowa_cli::config::{
    ConfigController, ConfigStore, CredentialSet, FileStore, Provider, StoreError, StoreKey,
};
use std::fs;
use tempfile::TempDir;

fn temp_store() -> (TempDir, FileStore) {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("nested").join("settings.json"));
    (dir, store)
}

// ── FileStore ─────────────────────────────────────────────────────────────────

#[test]
fn missing_file_reads_as_empty() {
    let (_dir, store) = temp_store();
    for key in StoreKey::all() {
        assert_eq!(store.read(key).unwrap(), None);
    }
}

#[test]
fn write_creates_parent_dirs_and_reads_back() {
    let (_dir, mut store) = temp_store();
    store.write(StoreKey::Provider, "local").unwrap();
    assert!(store.path().exists());
    assert_eq!(store.read(StoreKey::Provider).unwrap().as_deref(), Some("local"));
}

#[test]
fn file_is_a_flat_json_object_with_wire_key_names() {
    let (_dir, mut store) = temp_store();
    store.write(StoreKey::Provider, "openai-compatible").unwrap();
    store.write(StoreKey::BaseUrl, "https://x/v1").unwrap();
    let content = fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["provider"], "openai-compatible");
    assert_eq!(value["baseUrl"], "https://x/v1");
    assert!(value.get("apiKey").is_none());
}

#[test]
fn remove_deletes_only_that_key() {
    let (_dir, mut store) = temp_store();
    store.write(StoreKey::Provider, "openai").unwrap();
    store.write(StoreKey::ApiKey, "sk-1").unwrap();
    store.remove(StoreKey::ApiKey).unwrap();
    assert_eq!(store.read(StoreKey::ApiKey).unwrap(), None);
    assert_eq!(store.read(StoreKey::Provider).unwrap().as_deref(), Some("openai"));
}

#[test]
fn remove_on_missing_file_is_a_no_op() {
    let (_dir, mut store) = temp_store();
    store.remove(StoreKey::ModelName).unwrap();
    assert!(!store.path().exists());
}

#[test]
fn corrupt_file_is_reported() {
    let (_dir, store) = temp_store();
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    fs::write(store.path(), "[1, 2, 3]").unwrap();
    assert!(matches!(store.read(StoreKey::Provider), Err(StoreError::Corrupt { .. })));
}

// ── controller over FileStore ─────────────────────────────────────────────────

#[test]
fn saved_configuration_survives_reload() {
    let (_dir, store) = temp_store();
    let path = store.path().to_path_buf();

    let mut c = ConfigController::new(store);
    c.initialize().unwrap();
    c.switch_provider(Provider::Local);
    c.set_base_url("http://localhost:11434/v1");
    c.set_model_name("llama2");
    c.save().unwrap();

    let mut reloaded = ConfigController::new(FileStore::new(path));
    reloaded.initialize().unwrap();
    assert_eq!(reloaded.selected_provider(), Some(Provider::Local));
    assert_eq!(
        reloaded.saved(),
        Some(&CredentialSet::new("", "http://localhost:11434/v1", "llama2"))
    );
    assert!(reloaded.is_config_saved());
}

#[test]
fn remove_leaves_an_empty_object() {
    let (_dir, store) = temp_store();
    let path = store.path().to_path_buf();
    let mut c = ConfigController::new(store);
    c.initialize().unwrap();
    c.set_api_key("sk-1");
    c.save().unwrap();
    c.remove().unwrap();
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(value, serde_json::json!({}));
}
