use async_trait::async_trait;
use sipbridge_core::{
    AppConfig, Contact, ContactAdapter, ContactTemplate, ContactUpdate, ProviderConfig,
    ServiceError,
};
use sipbridge_sipgate::{Scope, ScopeFilter, SipgateClient, SipgateCredentials, SipgateError};
use uuid::Uuid;

use crate::translate::{is_listed, to_canonical, to_provider_payload};

/// Process-wide settings for [`SipgateTeamAdapter`].
#[derive(Debug, Clone)]
pub struct AdapterSettings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub page_size: u32,
    /// Link returned as `contactUrl` on every canonical contact.
    pub team_contacts_url: String,
}

impl From<&AppConfig> for AdapterSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            api_base_url: config.sipgate_api_base_url.clone(),
            request_timeout_secs: config.sipgate_request_timeout_secs,
            page_size: config.sipgate_page_size,
            team_contacts_url: config.team_contacts_url.clone(),
        }
    }
}

/// Bridges sipgate Team contacts to the canonical contact model.
///
/// Credentials arrive with every call, so a [`SipgateClient`] is assembled per
/// request around one shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct SipgateTeamAdapter {
    http: reqwest::Client,
    settings: AdapterSettings,
}

impl SipgateTeamAdapter {
    /// # Errors
    ///
    /// Returns [`SipgateError::Http`] if the HTTP client cannot be built.
    pub fn new(settings: AdapterSettings) -> Result<Self, SipgateError> {
        let http = SipgateClient::build_http_client(settings.request_timeout_secs)?;
        Ok(Self { http, settings })
    }

    fn client(&self, config: &ProviderConfig) -> Result<SipgateClient, ServiceError> {
        let (token_id, token) = config.credentials()?;
        let client = SipgateClient::from_parts(
            self.http.clone(),
            &self.settings.api_base_url,
            SipgateCredentials::new(token_id, token),
        )
        .map_err(|e| service_error("configure sipgate client", &e))?;
        Ok(client.with_page_size(self.settings.page_size))
    }

    fn contact_url(&self) -> Option<String> {
        Some(self.settings.team_contacts_url.clone())
    }
}

#[async_trait]
impl ContactAdapter for SipgateTeamAdapter {
    async fn get_contacts(&self, config: &ProviderConfig) -> Result<Vec<Contact>, ServiceError> {
        let client = self.client(config)?;
        let contacts = client
            .get_contacts(ScopeFilter::All)
            .await
            .map_err(|e| service_error("fetch contacts", &e))?;

        let listed: Vec<Contact> = contacts
            .iter()
            .filter(|c| is_listed(c.scope))
            .map(|c| to_canonical(c, &self.settings.team_contacts_url))
            .collect();

        tracing::info!(
            fetched = contacts.len(),
            listed = listed.len(),
            "listed sipgate contacts"
        );
        Ok(listed)
    }

    async fn create_contact(
        &self,
        config: &ProviderConfig,
        contact: ContactTemplate,
    ) -> Result<Contact, ServiceError> {
        let client = self.client(config)?;
        let id = Uuid::new_v4().to_string();
        let payload = to_provider_payload(&id, &contact, None);
        tracing::debug!(?payload, "creating sipgate contact");

        client
            .update_contact(&payload)
            .await
            .map_err(|e| service_error("create contact", &e))?;

        tracing::info!(contact_id = %id, "created sipgate contact");
        Ok(contact.into_contact(id, self.contact_url()))
    }

    async fn update_contact(
        &self,
        config: &ProviderConfig,
        id: &str,
        contact: ContactUpdate,
    ) -> Result<Contact, ServiceError> {
        let client = self.client(config)?;

        // Re-read the stored record so fields the bridge does not carry
        // survive the write. A stored record that cannot be read aborts.
        let existing = client
            .find_contact(id, ScopeFilter::Only(Scope::Shared))
            .await
            .map_err(|e| service_error("fetch contact for update", &e))?;
        if existing.is_none() {
            tracing::debug!(contact_id = %id, "no stored shared contact; writing without merge");
        }

        let payload = to_provider_payload(id, &contact.fields, existing.as_ref());
        tracing::debug!(?payload, "updating sipgate contact");

        client
            .update_contact(&payload)
            .await
            .map_err(|e| service_error("update contact", &e))?;

        tracing::info!(contact_id = %id, "updated sipgate contact");
        Ok(contact.into_contact(self.contact_url()))
    }

    async fn delete_contact(&self, config: &ProviderConfig, id: &str) -> Result<(), ServiceError> {
        let client = self.client(config)?;
        client
            .delete_contact(id)
            .await
            .map_err(|e| service_error("delete contact", &e))?;

        tracing::info!(contact_id = %id, "deleted sipgate contact");
        Ok(())
    }
}

/// Converts a sipgate failure into the bridge error, keeping the remote status
/// (500 when there is none).
fn service_error(operation: &str, err: &SipgateError) -> ServiceError {
    let status = err.status();
    tracing::warn!(operation, status = ?status, error = %err, "sipgate request failed");

    let detail = match err {
        SipgateError::Api { message, .. } => message.clone(),
        other => other.to_string(),
    };
    ServiceError::from_status(status, format!("Could not {operation}: {detail}"))
}
