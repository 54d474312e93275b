pub mod analysis;
pub mod config;
pub mod logging;
pub mod tui;

pub use analysis::AnalysisBinding;
pub use config::{
    ConfigController, ConfigError, ConfigEvent, ConfigNotice, ConfigStore, CredentialSet, Field,
    FileStore, MemoryStore, Provider, StoreKey,
};
pub use tui::{render_to_buffer, App};

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

/// Opens the settings file and loads the saved configuration from it.
pub fn open_controller(store: &Path) -> Result<ConfigController<FileStore>> {
    let mut controller = ConfigController::new(FileStore::new(store));
    controller
        .initialize()
        .with_context(|| format!("Failed to load configuration from {}", store.display()))?;
    Ok(controller)
}

/// Shows only the last four characters of a secret.
pub fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count == 0 {
        return "(none)".to_string();
    }
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = key.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}

pub fn status_report<S: ConfigStore>(controller: &ConfigController<S>) -> String {
    let mut out = String::new();
    match (controller.saved_provider(), controller.saved()) {
        (Some(provider), Some(saved)) => {
            let profile = provider.profile();
            let _ = writeln!(out, "Provider   : {} ({})", provider.label(), provider);
            let _ = writeln!(out, "API key    : {}", mask_key(&saved.api_key));
            if profile.needs_base_url {
                let _ = writeln!(out, "Base URL   : {}", saved.base_url);
            }
            if profile.needs_model_name {
                let _ = writeln!(out, "Model name : {}", saved.model_name);
            }
            if let Some(line) = controller.status_line() {
                let _ = writeln!(out, "{line}");
            }
        }
        _ => {
            let _ = writeln!(out, "No LLM configuration saved.");
        }
    }
    out
}

/// Machine-readable form of the saved configuration. The key is masked.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusView {
    pub provider: Option<Provider>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model_name: Option<String>,
    pub is_set: bool,
}

impl<S: ConfigStore> From<&ConfigController<S>> for StatusView {
    fn from(controller: &ConfigController<S>) -> Self {
        let saved = controller.saved();
        let field = |f: Field| {
            saved
                .map(|s| s.get(f))
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        StatusView {
            provider: controller.saved_provider(),
            api_key: field(Field::ApiKey).map(|k| mask_key(&k)),
            base_url: field(Field::BaseUrl),
            model_name: field(Field::ModelName),
            is_set: controller.is_config_saved(),
        }
    }
}

pub fn status(store: &Path, json: bool) -> Result<()> {
    let controller = open_controller(store)?;
    if json {
        let view = StatusView::from(&controller);
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("Settings file: {}", store.display());
        print!("{}", status_report(&controller));
    }
    Ok(())
}

pub fn providers() -> Result<()> {
    println!("Supported LLM providers:");
    for p in Provider::all() {
        let profile = p.profile();
        let fields: Vec<&str> = profile
            .visible_fields()
            .into_iter()
            .map(|f| {
                if profile.requires(f) {
                    f.as_str()
                } else {
                    "apiKey (optional)"
                }
            })
            .collect();
        println!("- {:<18} {:<45} {}", p.as_str(), p.label(), fields.join(", "));
    }
    Ok(())
}

/// Field values given on the command line. `None` keeps whatever the
/// provider already has saved.
#[derive(Debug, Default, Clone)]
pub struct SaveArgs {
    pub provider: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model_name: Option<String>,
}

pub fn save(store: &Path, args: SaveArgs) -> Result<ConfigEvent> {
    let provider: Provider = args.provider.parse()?;
    let mut controller = open_controller(store)?;
    controller.switch_provider(provider);
    if let Some(v) = args.api_key {
        controller.set_api_key(v);
    }
    if let Some(v) = args.base_url {
        controller.set_base_url(v);
    }
    if let Some(v) = args.model_name {
        controller.set_model_name(v);
    }
    let event = controller.save()?;
    println!("{}", event.message());
    Ok(event)
}

pub fn remove(store: &Path) -> Result<ConfigEvent> {
    let mut controller = open_controller(store)?;
    let event = controller.remove()?;
    println!("{}", event.message());
    Ok(event)
}
