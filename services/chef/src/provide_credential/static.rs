use crate::Credential;
use async_trait::async_trait;
use cloudsign_core::{Context, ProvideCredential, Result};
use rsa::RsaPrivateKey;

/// StaticCredentialProvider always returns the same client name and key.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a provider from an already parsed key.
    pub fn new(user_id: &str, private_key: RsaPrivateKey) -> Self {
        Self {
            credential: Credential::new(user_id, private_key),
        }
    }

    /// Create a provider from a PEM encoded private key.
    pub fn from_pem(user_id: &str, pem: &str) -> Result<Self> {
        Ok(Self {
            credential: Credential::from_pem(user_id, pem)?,
        })
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.credential.clone()))
    }
}
