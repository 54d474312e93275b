// ── LLM providers ────────────────────────────────────────────────────────────

use std::fmt;
use std::str::FromStr;

use crate::config::error::{ConfigError, Field};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Provider {
    #[default]
    OpenAI,
    Anthropic,
    Google,
    Local,
    OpenAICompatible,
}

/// Which credential fields a provider mandates.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RequirementProfile {
    pub key_required: bool,
    pub needs_base_url: bool,
    pub needs_model_name: bool,
}

impl RequirementProfile {
    /// Whether the field is shown for this profile and takes part in
    /// saved/dirty comparison. Every provider has a key field; it is only
    /// optional for some.
    pub fn uses(&self, field: Field) -> bool {
        match field {
            Field::ApiKey    => true,
            Field::BaseUrl   => self.needs_base_url,
            Field::ModelName => self.needs_model_name,
        }
    }

    /// Whether a blank value for the field must fail a save.
    pub fn requires(&self, field: Field) -> bool {
        match field {
            Field::ApiKey    => self.key_required,
            Field::BaseUrl   => self.needs_base_url,
            Field::ModelName => self.needs_model_name,
        }
    }

    /// Fields to render, in display order.
    pub fn visible_fields(&self) -> Vec<Field> {
        // endpoint fields come first, matching the form layout
        [Field::BaseUrl, Field::ModelName, Field::ApiKey]
            .into_iter()
            .filter(|f| self.uses(*f))
            .collect()
    }
}

pub fn profile_for(provider: Provider) -> RequirementProfile {
    match provider {
        Provider::OpenAI | Provider::Anthropic | Provider::Google => RequirementProfile {
            key_required: true,
            needs_base_url: false,
            needs_model_name: false,
        },
        Provider::Local => RequirementProfile {
            key_required: false,
            needs_base_url: true,
            needs_model_name: true,
        },
        Provider::OpenAICompatible => RequirementProfile {
            key_required: true,
            needs_base_url: true,
            needs_model_name: true,
        },
    }
}

/// Looks up a profile from a raw identifier, as read from storage or the CLI.
pub fn profile_for_id(id: &str) -> Result<RequirementProfile, ConfigError> {
    Ok(profile_for(id.parse()?))
}

impl Provider {
    /// Providers in the order they are offered to the user.
    pub fn all() -> Vec<Provider> {
        vec![
            Provider::OpenAI,
            Provider::OpenAICompatible,
            Provider::Anthropic,
            Provider::Google,
            Provider::Local,
        ]
    }

    /// Persisted identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAI           => "openai",
            Provider::Anthropic        => "anthropic",
            Provider::Google           => "google",
            Provider::Local            => "local",
            Provider::OpenAICompatible => "openai-compatible",
        }
    }

    pub fn profile(&self) -> RequirementProfile {
        profile_for(*self)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Provider::OpenAI           => "OpenAI",
            Provider::Anthropic        => "Anthropic",
            Provider::Google           => "Google Gemini",
            Provider::Local            => "Local Model (e.g., Ollama, private endpoint)",
            Provider::OpenAICompatible => "OpenAI Compatible LLM",
        }
    }

    pub fn api_key_label(&self) -> &'static str {
        match self {
            Provider::Local => "Local Model Endpoint/Key (if applicable)",
            _               => "Your LLM API Key",
        }
    }

    pub fn api_key_placeholder(&self) -> &'static str {
        match self {
            Provider::OpenAI | Provider::OpenAICompatible => "sk-xxxxxxxxxxxxxxxxxxxxxxxxxxxx",
            Provider::Anthropic => "sk-ant-REDACTED",
            Provider::Google    => "AIzaSyxxxxxxxxxxxxxxxxxxxxxxxxxxxx",
            Provider::Local     => "Enter API Key or Endpoint URL",
        }
    }

    pub fn placeholder(&self, field: Field) -> &'static str {
        match field {
            Field::ApiKey => self.api_key_placeholder(),
            Field::BaseUrl => match self {
                Provider::Local => "e.g., http://localhost:11434/v1",
                _               => "e.g., https://api.example.com/v1",
            },
            Field::ModelName => match self {
                Provider::Local => "e.g., llama2",
                _               => "e.g., gpt-3.5-turbo or custom-model",
            },
        }
    }

    pub fn field_label(&self, field: Field) -> &'static str {
        match field {
            Field::ApiKey => self.api_key_label(),
            other         => other.label(),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Provider::OpenAI           => "Cloud · Requires API key",
            Provider::Anthropic        => "Cloud · Requires API key",
            Provider::Google           => "Cloud · Requires API key",
            Provider::Local            => "Self-hosted · Endpoint and model required · Key optional",
            Provider::OpenAICompatible => "Any OpenAI-style endpoint · Key, endpoint and model required",
        }
    }
}

impl serde::Serialize for Provider {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai"            => Ok(Provider::OpenAI),
            "anthropic"         => Ok(Provider::Anthropic),
            "google"            => Ok(Provider::Google),
            "local"             => Ok(Provider::Local),
            "openai-compatible" => Ok(Provider::OpenAICompatible),
            other => Err(ConfigError::UnknownProviderKind(other.to_string())),
        }
    }
}
