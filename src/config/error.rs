use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ── Editable fields ───────────────────────────────────────────────────────────

/// One of the three credential fields a user can edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    ApiKey,
    BaseUrl,
    ModelName,
}

impl Field {
    pub fn all() -> [Field; 3] {
        [Field::ApiKey, Field::BaseUrl, Field::ModelName]
    }

    /// Identifier used in error payloads and as the persisted key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::ApiKey    => "apiKey",
            Field::BaseUrl   => "baseUrl",
            Field::ModelName => "modelName",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::ApiKey    => "API Key",
            Field::BaseUrl   => "Base URL",
            Field::ModelName => "Model Name",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Failures of the persistence medium.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file {path} is not a flat JSON object: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("store rejected write of `{0}`")]
    Rejected(&'static str),
}

/// Errors surfaced by the configuration controller.
///
/// Validation errors leave both the persisted state and the draft untouched,
/// so the caller can show the message and let the user retry.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Please select an LLM provider.")]
    MissingProviderSelection,
    #[error("{} cannot be empty.", .0.label())]
    MissingRequiredField(Field),
    #[error("unknown LLM provider `{0}`")]
    UnknownProviderKind(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ConfigError {
    /// The offending field, for validation errors.
    pub fn field(&self) -> Option<Field> {
        match self {
            ConfigError::MissingRequiredField(field) => Some(*field),
            _ => None,
        }
    }
}
