// ── Document-analysis binding ────────────────────────────────────────────────

use crate::config::{ConfigListener, ConfigNotice, Field, Provider};

/// Holds the configuration the statement-of-work analyzer would submit
/// documents with. It only tracks notices; no analysis is performed here.
#[derive(Debug, Default, Clone)]
pub struct AnalysisBinding {
    latest: Option<ConfigNotice>,
    updates: usize,
}

impl AnalysisBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<&ConfigNotice> {
        self.latest.as_ref()
    }

    /// Number of notices received so far.
    pub fn updates(&self) -> usize {
        self.updates
    }

    pub fn provider(&self) -> Option<Provider> {
        self.latest.as_ref().and_then(|n| n.provider)
    }

    /// The first field the analyzer would still need, if any.
    pub fn missing_field(&self) -> Option<Field> {
        let notice = self.latest.as_ref()?;
        let profile = notice.provider?.profile();
        let present = |field: Field| match field {
            Field::ApiKey    => notice.api_key.is_some(),
            Field::BaseUrl   => notice.base_url.is_some(),
            Field::ModelName => notice.model_name.is_some(),
        };
        [Field::BaseUrl, Field::ModelName, Field::ApiKey]
            .into_iter()
            .find(|f| profile.requires(*f) && !present(*f))
    }

    /// Whether a document could be submitted with the current configuration.
    pub fn is_ready(&self) -> bool {
        self.provider().is_some() && self.missing_field().is_none()
    }

    pub fn describe(&self) -> String {
        match self.provider() {
            None => "Analyzer: no provider selected".to_string(),
            Some(p) => match self.missing_field() {
                None => format!("Analyzer: ready ({})", p.label()),
                Some(field) => format!("Analyzer: waiting for {} ({})", field.label(), p.label()),
            },
        }
    }
}

impl ConfigListener for AnalysisBinding {
    fn on_config_change(&mut self, notice: &ConfigNotice) {
        self.latest = Some(notice.clone());
        self.updates += 1;
    }
}
