//! Credential provider implementations

mod env_provider;
mod factory;
mod file_provider;
mod secrets_loader;

pub use env_provider::EnvCredentialProvider;
pub use factory::{CredentialProviderFactory, ProviderConfig};
pub use file_provider::FileCredentialProvider;
pub use secrets_loader::load_secrets;
