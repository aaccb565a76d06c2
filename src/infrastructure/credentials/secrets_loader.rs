use tracing::{debug, error};

use crate::domain::{CredentialProvider, CredentialType, DomainError, Secrets};

/// Resolve every key the pipeline needs. Any failure is `CredentialMissing`,
/// so the caller can stop before a single query is processed.
pub async fn load_secrets(provider: &dyn CredentialProvider) -> Result<Secrets, DomainError> {
    let judge_key = fetch(provider, CredentialType::Judge).await?;
    let generation_key = fetch(provider, CredentialType::Generation).await?;
    let search_key = fetch(provider, CredentialType::WebSearch).await?;

    Ok(Secrets {
        judge_key,
        generation_key,
        search_key,
    })
}

async fn fetch(
    provider: &dyn CredentialProvider,
    credential_type: CredentialType,
) -> Result<String, DomainError> {
    match provider.get_credential(credential_type).await {
        Ok(credential) => {
            debug!(
                provider = provider.provider_name(),
                credential_type = %credential_type,
                "Credential loaded"
            );
            Ok(credential.into_api_key())
        }
        Err(DomainError::CredentialMissing { message }) => {
            error!(credential_type = %credential_type, "{}", message);
            Err(DomainError::CredentialMissing { message })
        }
        Err(e) => {
            error!(credential_type = %credential_type, error = %e, "Credential lookup failed");
            Err(DomainError::credential_missing(format!(
                "{} key unavailable: {}",
                credential_type, e
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Credential;
    use crate::domain::credentials::mock::MockCredentialProvider;

    #[tokio::test]
    async fn test_load_all_secrets() {
        let provider = MockCredentialProvider::new("mock")
            .with_credential(Credential::new(CredentialType::Judge, "gm"))
            .with_credential(Credential::new(CredentialType::Generation, "sk"))
            .with_credential(Credential::new(CredentialType::WebSearch, "sp"));

        let secrets = load_secrets(&provider).await.unwrap();

        assert_eq!(secrets.judge_key, "gm");
        assert_eq!(secrets.generation_key, "sk");
        assert_eq!(secrets.search_key, "sp");
    }

    #[tokio::test]
    async fn test_any_missing_key_fails() {
        let provider = MockCredentialProvider::new("mock")
            .with_credential(Credential::new(CredentialType::Judge, "gm"))
            .with_credential(Credential::new(CredentialType::Generation, "sk"));

        let error = load_secrets(&provider).await.unwrap_err();

        assert!(matches!(error, DomainError::CredentialMissing { .. }));
    }

    #[tokio::test]
    async fn test_complete_mock_provider() {
        let secrets = load_secrets(&MockCredentialProvider::complete()).await.unwrap();
        assert_eq!(secrets.search_key, "web_search-key");
    }
}
