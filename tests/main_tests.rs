use sowa_cli::{
    mask_key, open_controller, providers, remove, save, status, status_report, AnalysisBinding,
    ConfigController, ConfigEvent, ConfigNotice, MemoryStore, Provider, SaveArgs, StatusView,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn temp_store() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    (dir, path)
}

fn args(provider: &str) -> SaveArgs {
    SaveArgs { provider: provider.to_string(), ..SaveArgs::default() }
}

// ── save ──────────────────────────────────────────────────────────────────────

#[test]
fn save_writes_settings_file() {
    let (_dir, path) = temp_store();
    let event = save(
        &path,
        SaveArgs {
            api_key: Some("sk-123".into()),
            base_url: Some("https://x/v1".into()),
            model_name: Some("llama".into()),
            ..args("openai-compatible")
        },
    )
    .unwrap();
    assert_eq!(event, ConfigEvent::ConfigurationSaved { provider: Provider::OpenAICompatible });
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"modelName\": \"llama\""));
}

#[test]
fn save_rejects_unknown_provider() {
    let (_dir, path) = temp_store();
    let err = save(&path, args("cohere")).unwrap_err();
    assert!(err.to_string().contains("unknown LLM provider `cohere`"));
    assert!(!path.exists());
}

#[test]
fn save_reports_missing_field() {
    let (_dir, path) = temp_store();
    let err = save(&path, args("google")).unwrap_err();
    assert_eq!(err.to_string(), "API Key cannot be empty.");
    assert!(!path.exists());
}

#[test]
fn save_keeps_saved_values_for_omitted_flags() {
    let (_dir, path) = temp_store();
    save(
        &path,
        SaveArgs {
            api_key: Some("sk-1".into()),
            base_url: Some("https://x/v1".into()),
            model_name: Some("llama".into()),
            ..args("openai-compatible")
        },
    )
    .unwrap();
    save(&path, SaveArgs { model_name: Some("llama-3".into()), ..args("openai-compatible") }).unwrap();

    let c = open_controller(&path).unwrap();
    let saved = c.saved().unwrap();
    assert_eq!(saved.api_key, "sk-1");
    assert_eq!(saved.base_url, "https://x/v1");
    assert_eq!(saved.model_name, "llama-3");
}

#[test]
fn save_for_another_provider_overwrites_single_slot() {
    let (_dir, path) = temp_store();
    save(&path, SaveArgs { api_key: Some("sk-1".into()), ..args("openai") }).unwrap();
    save(&path, SaveArgs { api_key: Some("sk-ant-1".into()), ..args("anthropic") }).unwrap();
    let c = open_controller(&path).unwrap();
    assert_eq!(c.saved_provider(), Some(Provider::Anthropic));
    assert_eq!(c.saved().unwrap().api_key, "sk-ant-1");
}

// ── remove ────────────────────────────────────────────────────────────────────

#[test]
fn remove_clears_settings() {
    let (_dir, path) = temp_store();
    save(&path, SaveArgs { api_key: Some("sk-1".into()), ..args("openai") }).unwrap();
    assert_eq!(remove(&path).unwrap(), ConfigEvent::ConfigurationRemoved);
    let c = open_controller(&path).unwrap();
    assert!(c.saved().is_none());
}

// ── status ────────────────────────────────────────────────────────────────────

#[test]
fn status_report_without_config() {
    let mut c = ConfigController::new(MemoryStore::new());
    c.initialize().unwrap();
    assert_eq!(status_report(&c), "No LLM configuration saved.\n");
}

#[test]
fn status_report_masks_key_and_lists_endpoint() {
    let mut c = ConfigController::new(MemoryStore::new());
    c.initialize().unwrap();
    c.switch_provider(Provider::OpenAICompatible);
    c.set_api_key("sk-123456");
    c.set_base_url("https://x/v1");
    c.set_model_name("llama");
    c.save().unwrap();
    let report = status_report(&c);
    assert!(report.contains("OpenAI Compatible LLM (openai-compatible)"));
    assert!(report.contains("*****3456"));
    assert!(!report.contains("sk-123456"));
    assert!(report.contains("Base URL   : https://x/v1"));
    assert!(report.contains("is currently set."));
}

#[test]
fn status_runs_for_missing_file() {
    let (_dir, path) = temp_store();
    assert!(status(&path, false).is_ok());
    assert!(status(&path, true).is_ok());
}

#[test]
fn status_view_serializes_wire_names() {
    let mut c = ConfigController::new(MemoryStore::new());
    c.initialize().unwrap();
    c.switch_provider(Provider::Local);
    c.set_base_url("http://localhost:11434/v1");
    c.set_model_name("llama2");
    c.save().unwrap();
    let value = serde_json::to_value(StatusView::from(&c)).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "provider": "local",
            "apiKey": null,
            "baseUrl": "http://localhost:11434/v1",
            "modelName": "llama2",
            "isSet": true,
        })
    );
}

#[test]
fn status_fails_for_corrupt_file() {
    let (_dir, path) = temp_store();
    fs::write(&path, "not json").unwrap();
    let err = status(&path, false).unwrap_err();
    assert!(err.to_string().contains("Failed to load configuration"));
}

#[test]
fn providers_runs_without_error() {
    assert!(providers().is_ok());
}

// ── mask_key ──────────────────────────────────────────────────────────────────

#[test]
fn mask_key_variants() {
    assert_eq!(mask_key(""), "(none)");
    assert_eq!(mask_key("abc"), "***");
    assert_eq!(mask_key("sk-abcdef"), "*****cdef");
}

// ── AnalysisBinding ───────────────────────────────────────────────────────────

#[test]
fn analysis_binding_waits_for_required_fields() {
    use sowa_cli::config::ConfigListener;
    let mut binding = AnalysisBinding::new();
    assert!(!binding.is_ready());
    assert_eq!(binding.describe(), "Analyzer: no provider selected");

    binding.on_config_change(&ConfigNotice {
        provider: Some(Provider::Local),
        base_url: Some("http://localhost:11434/v1".into()),
        ..ConfigNotice::default()
    });
    assert!(!binding.is_ready());
    assert_eq!(binding.describe(), "Analyzer: waiting for Model Name (Local Model (e.g., Ollama, private endpoint))");

    binding.on_config_change(&ConfigNotice {
        provider: Some(Provider::Local),
        base_url: Some("http://localhost:11434/v1".into()),
        model_name: Some("llama2".into()),
        ..ConfigNotice::default()
    });
    assert!(binding.is_ready());
    assert_eq!(binding.updates(), 2);
}
