//! The adapter seam between the bridge host and a contact provider.

use async_trait::async_trait;

use crate::contact::{Contact, ContactTemplate, ContactUpdate};
use crate::error::ServiceError;

/// Per-request provider configuration handed over by the bridge host.
#[derive(Clone, Default)]
pub struct ProviderConfig {
    /// Composite credential: `<token id>:<token>`.
    pub api_key: String,
    pub api_url: Option<String>,
    pub locale: Option<String>,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: None,
            locale: None,
        }
    }

    /// Splits the API key into `(token_id, token)` at the first colon.
    ///
    /// # Errors
    ///
    /// Returns a 401 [`ServiceError`] when the key contains no colon.
    pub fn credentials(&self) -> Result<(&str, &str), ServiceError> {
        self.api_key
            .split_once(':')
            .ok_or_else(|| ServiceError::new(401, "API key must have the form <token id>:<token>"))
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"[redacted]")
            .field("api_url", &self.api_url)
            .field("locale", &self.locale)
            .finish()
    }
}

/// A contact provider the bridge can list, create, update and delete against.
#[async_trait]
pub trait ContactAdapter: Send + Sync {
    /// Lists every contact visible to the bridge.
    async fn get_contacts(&self, config: &ProviderConfig) -> Result<Vec<Contact>, ServiceError>;

    async fn create_contact(
        &self,
        config: &ProviderConfig,
        contact: ContactTemplate,
    ) -> Result<Contact, ServiceError>;

    async fn update_contact(
        &self,
        config: &ProviderConfig,
        id: &str,
        contact: ContactUpdate,
    ) -> Result<Contact, ServiceError>;

    async fn delete_contact(&self, config: &ProviderConfig, id: &str) -> Result<(), ServiceError>;
}
