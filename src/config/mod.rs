pub mod controller;
pub mod error;
pub mod providers;
pub mod store;

pub use controller::{
    ConfigController, ConfigEvent, ConfigListener, ConfigNotice, CredentialSet, SessionState,
};
pub use error::{ConfigError, Field, StoreError};
pub use providers::{profile_for, profile_for_id, Provider, RequirementProfile};
pub use store::{default_store_path, ConfigStore, FileStore, MemoryStore, StoreKey};
