// Configuration controller
// Owns the session state and is the only code that reads or writes the store

use tracing::{debug, info, warn};

use crate::config::error::{ConfigError, Field};
use crate::config::providers::{profile_for, Provider, RequirementProfile};
use crate::config::store::{ConfigStore, StoreKey};

// ── Credentials ───────────────────────────────────────────────────────────────

/// One provider's configuration. Unset fields are empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CredentialSet {
    pub api_key: String,
    pub base_url: String,
    pub model_name: String,
}

impl CredentialSet {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            model_name: model_name.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::ApiKey    => &self.api_key,
            Field::BaseUrl   => &self.base_url,
            Field::ModelName => &self.model_name,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::ApiKey    => self.api_key = value,
            Field::BaseUrl   => self.base_url = value,
            Field::ModelName => self.model_name = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Trimmed copy keeping only the fields `profile` uses.
    fn restricted_to(&self, profile: RequirementProfile) -> Self {
        let mut out = Self::default();
        for field in Field::all() {
            if profile.uses(field) {
                out.set(field, self.get(field).trim().to_string());
            }
        }
        out
    }
}

// ── Session state ─────────────────────────────────────────────────────────────

/// Everything the controller tracks for one editing session.
///
/// `selected_provider` is `None` only before [`ConfigController::initialize`].
/// `saved` and `saved_provider` mirror what is known to be in the store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub selected_provider: Option<Provider>,
    pub draft: CredentialSet,
    pub saved: Option<CredentialSet>,
    pub saved_provider: Option<Provider>,
}

// ── Notifications ─────────────────────────────────────────────────────────────

/// The tuple handed to the document-analysis side whenever the effective
/// configuration changes. Blank fields are reported as `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigNotice {
    pub api_key: Option<String>,
    pub provider: Option<Provider>,
    pub base_url: Option<String>,
    pub model_name: Option<String>,
}

impl ConfigNotice {
    fn new(provider: Provider, set: &CredentialSet) -> Self {
        let non_blank = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        Self {
            api_key: non_blank(&set.api_key),
            provider: Some(provider),
            base_url: non_blank(&set.base_url),
            model_name: non_blank(&set.model_name),
        }
    }
}

pub trait ConfigListener {
    fn on_config_change(&mut self, notice: &ConfigNotice);
}

impl<F: FnMut(&ConfigNotice)> ConfigListener for F {
    fn on_config_change(&mut self, notice: &ConfigNotice) {
        self(notice)
    }
}

/// User-facing outcome of a successful save or remove.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigEvent {
    ConfigurationSaved { provider: Provider },
    ConfigurationRemoved,
}

impl ConfigEvent {
    pub fn message(&self) -> &'static str {
        match self {
            ConfigEvent::ConfigurationSaved { .. } => "LLM Configuration saved successfully!",
            ConfigEvent::ConfigurationRemoved      => "LLM Configuration removed.",
        }
    }
}

// ── Controller ────────────────────────────────────────────────────────────────

pub struct ConfigController<S: ConfigStore> {
    store: S,
    state: SessionState,
    listener: Option<Box<dyn ConfigListener>>,
}

impl<S: ConfigStore> ConfigController<S> {
    /// Creates an uninitialized controller; call [`initialize`](Self::initialize)
    /// before presenting it.
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: SessionState::default(),
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: impl ConfigListener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn set_listener(&mut self, listener: impl ConfigListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn selected_provider(&self) -> Option<Provider> {
        self.state.selected_provider
    }

    pub fn draft(&self) -> &CredentialSet {
        &self.state.draft
    }

    pub fn saved(&self) -> Option<&CredentialSet> {
        self.state.saved.as_ref()
    }

    pub fn saved_provider(&self) -> Option<Provider> {
        self.state.saved_provider
    }

    /// Profile of the selected provider, or of the default before initialization.
    pub fn profile(&self) -> RequirementProfile {
        profile_for(self.state.selected_provider.unwrap_or_default())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // ── Transitions ──────────────────────────────────────────────────────────

    /// Hydrates the session from the store. Safe to call again to reload.
    pub fn initialize(&mut self) -> Result<(), ConfigError> {
        let stored_provider = self.store.read(StoreKey::Provider)?;
        let api_key = self.store.read(StoreKey::ApiKey)?;
        let base_url = self.store.read(StoreKey::BaseUrl)?;
        let model_name = self.store.read(StoreKey::ModelName)?;

        let provider = match stored_provider.as_deref().map(str::parse::<Provider>) {
            Some(Ok(p)) => Some(p),
            Some(Err(e)) => {
                warn!("ignoring stored configuration: {e}");
                None
            }
            None => None,
        };

        self.state = match provider {
            Some(provider) => {
                let profile = profile_for(provider);
                let saved = CredentialSet {
                    api_key: api_key.unwrap_or_default(),
                    base_url: base_url
                        .filter(|_| profile.needs_base_url)
                        .unwrap_or_default(),
                    model_name: model_name
                        .filter(|_| profile.needs_model_name)
                        .unwrap_or_default(),
                };
                info!(provider = provider.as_str(), "loaded saved configuration");
                SessionState {
                    selected_provider: Some(provider),
                    draft: saved.clone(),
                    saved: Some(saved),
                    saved_provider: Some(provider),
                }
            }
            None => {
                debug!("no saved configuration, defaulting to openai");
                SessionState {
                    selected_provider: Some(Provider::default()),
                    ..SessionState::default()
                }
            }
        };
        self.notify_draft();
        Ok(())
    }

    /// Selects another provider. The draft is always cleared first and only
    /// refilled when the store holds this provider's configuration.
    pub fn switch_provider(&mut self, provider: Provider) {
        debug!(provider = provider.as_str(), "switching provider");
        self.state.selected_provider = Some(provider);
        self.state.draft.clear();
        if self.state.saved_provider == Some(provider) {
            if let Some(saved) = &self.state.saved {
                self.state.draft = saved.restricted_to(profile_for(provider));
            }
        }
        self.notify_draft();
    }

    pub fn edit_field(&mut self, field: Field, value: impl Into<String>) {
        self.state.draft.set(field, value.into());
    }

    pub fn set_api_key(&mut self, value: impl Into<String>) {
        self.edit_field(Field::ApiKey, value);
    }

    pub fn set_base_url(&mut self, value: impl Into<String>) {
        self.edit_field(Field::BaseUrl, value);
    }

    pub fn set_model_name(&mut self, value: impl Into<String>) {
        self.edit_field(Field::ModelName, value);
    }

    /// Validates the draft against the selected provider's profile and
    /// persists it. Nothing is written when validation fails.
    ///
    /// A store failure partway through leaves the earlier keys written and
    /// the in-memory snapshot unchanged.
    pub fn save(&mut self) -> Result<ConfigEvent, ConfigError> {
        let provider = self
            .state
            .selected_provider
            .ok_or(ConfigError::MissingProviderSelection)?;
        let profile = profile_for(provider);

        for field in [Field::BaseUrl, Field::ModelName, Field::ApiKey] {
            if profile.requires(field) && self.state.draft.get(field).trim().is_empty() {
                return Err(ConfigError::MissingRequiredField(field));
            }
        }

        let to_save = self.state.draft.restricted_to(profile);
        self.store.write(StoreKey::Provider, provider.as_str())?;
        for field in Field::all() {
            let value = to_save.get(field);
            if value.is_empty() {
                self.store.remove(field.into())?;
            } else {
                self.store.write(field.into(), value)?;
            }
        }

        info!(provider = provider.as_str(), "configuration saved");
        self.state.draft = to_save.clone();
        self.state.saved = Some(to_save);
        self.state.saved_provider = Some(provider);
        self.notify_draft();
        Ok(ConfigEvent::ConfigurationSaved { provider })
    }

    /// Clears every persisted key and resets the session to the default provider.
    pub fn remove(&mut self) -> Result<ConfigEvent, ConfigError> {
        for key in StoreKey::all() {
            self.store.remove(key)?;
        }
        info!("configuration removed");
        self.state = SessionState {
            selected_provider: Some(Provider::default()),
            ..SessionState::default()
        };
        self.notify_draft();
        Ok(ConfigEvent::ConfigurationRemoved)
    }

    // ── Derived state ────────────────────────────────────────────────────────

    /// True when the store holds the selected provider's configuration and
    /// every field that provider uses matches the draft.
    pub fn is_config_saved(&self) -> bool {
        let (Some(selected), Some(saved)) = (self.state.selected_provider, &self.state.saved) else {
            return false;
        };
        if self.state.saved_provider != Some(selected) {
            return false;
        }
        let profile = profile_for(selected);
        Field::all()
            .into_iter()
            .filter(|f| profile.uses(*f))
            .all(|f| self.state.draft.get(f) == saved.get(f))
    }

    pub fn is_dirty(&self) -> bool {
        !self.is_config_saved()
    }

    pub fn can_remove(&self) -> bool {
        self.is_config_saved()
    }

    pub fn save_action_label(&self) -> &'static str {
        if self.is_config_saved() {
            "Update Configuration"
        } else {
            "Save Configuration"
        }
    }

    pub fn status_line(&self) -> Option<String> {
        if !self.is_config_saved() {
            return None;
        }
        self.state
            .saved_provider
            .map(|p| format!("LLM Configuration for {} is currently set.", p.label()))
    }

    fn notify_draft(&mut self) {
        let provider = self.state.selected_provider.unwrap_or_default();
        let notice = ConfigNotice::new(provider, &self.state.draft);
        if let Some(listener) = self.listener.as_mut() {
            listener.on_config_change(&notice);
        }
    }
}
