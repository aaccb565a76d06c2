//! Credential management domain

mod credential;
mod provider;
mod secrets;

pub use credential::{Credential, CredentialType};
pub use provider::CredentialProvider;
pub use secrets::Secrets;

#[cfg(test)]
pub use provider::mock;
