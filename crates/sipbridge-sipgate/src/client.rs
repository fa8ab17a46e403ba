//! HTTP client for the sipgate REST API.
//!
//! Wraps `reqwest` with sipgate-specific authentication (HTTP Basic with a
//! personal access token), URL handling and error mapping. Every non-2xx
//! response is surfaced as [`SipgateError::Api`] carrying the status code.

use std::time::Duration;

use reqwest::{Client, Method, Response, Url};

use crate::error::SipgateError;
use crate::types::{Contact, ContactsPage, ScopeFilter};

pub const DEFAULT_BASE_URL: &str = "https://api.sipgate.com/v2/";

pub const DEFAULT_PAGE_SIZE: u32 = 5000;

/// Personal access token: the token id is the Basic auth user, the token the
/// password.
#[derive(Clone)]
pub struct SipgateCredentials {
    pub token_id: String,
    pub token: String,
}

impl SipgateCredentials {
    pub fn new(token_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            token_id: token_id.into(),
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for SipgateCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SipgateCredentials")
            .field("token_id", &self.token_id)
            .field("token", &"[redacted]")
            .finish()
    }
}

/// Client for the sipgate contacts API.
///
/// Use [`SipgateClient::new`] for production, [`SipgateClient::with_base_url`]
/// to point at a mock server in tests, or [`SipgateClient::from_parts`] to
/// reuse a shared `reqwest::Client` across credentials.
#[derive(Debug, Clone)]
pub struct SipgateClient {
    http: Client,
    base_url: Url,
    credentials: SipgateCredentials,
    page_size: u32,
}

impl SipgateClient {
    /// Creates a new client pointed at the production sipgate API.
    ///
    /// # Errors
    ///
    /// Returns [`SipgateError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(credentials: SipgateCredentials, timeout_secs: u64) -> Result<Self, SipgateError> {
        Self::with_base_url(credentials, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SipgateError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`SipgateError::InvalidBaseUrl`] if `base_url` is not a
    /// usable URL.
    pub fn with_base_url(
        credentials: SipgateCredentials,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SipgateError> {
        let http = Self::build_http_client(timeout_secs)?;
        Self::from_parts(http, base_url, credentials)
    }

    /// Creates a client around an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns [`SipgateError::InvalidBaseUrl`] if `base_url` is not a usable URL.
    pub fn from_parts(
        http: Client,
        base_url: &str,
        credentials: SipgateCredentials,
    ) -> Result<Self, SipgateError> {
        // Exactly one trailing slash so path segments append instead of
        // replacing the last segment of the base.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| SipgateError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(SipgateError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_owned(),
            });
        }

        Ok(Self {
            http,
            base_url: parsed,
            credentials,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Builds the `reqwest::Client` this crate uses for sipgate requests.
    ///
    /// # Errors
    ///
    /// Returns [`SipgateError::Http`] if the TLS backend cannot be initialised.
    pub fn build_http_client(timeout_secs: u64) -> Result<Client, SipgateError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("sipbridge/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(client)
    }

    /// Sets the number of contacts requested per page when listing.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Fetches every contact of the account and keeps those matching `scope`.
    ///
    /// Items that do not parse as a [`Contact`] are logged and skipped.
    ///
    /// # Errors
    ///
    /// - [`SipgateError::Api`] on a non-2xx response.
    /// - [`SipgateError::Http`] on network failure.
    /// - [`SipgateError::Deserialize`] if a page is not the expected envelope.
    pub async fn get_contacts(&self, scope: ScopeFilter) -> Result<Vec<Contact>, SipgateError> {
        let items = self.fetch_items().await?;
        let mut contacts: Vec<Contact> = items
            .into_iter()
            .filter_map(|item| {
                serde_json::from_value::<Contact>(item)
                    .map_err(|e| {
                        tracing::warn!(error = %e, "get_contacts: skipping malformed contact");
                    })
                    .ok()
            })
            .collect();

        tracing::debug!(count = contacts.len(), ?scope, "fetched sipgate contacts");
        contacts.retain(|c| scope.matches(c.scope));
        Ok(contacts)
    }

    /// Looks up the stored contact with `id` among those matching `scope`.
    ///
    /// Unlike [`get_contacts`](Self::get_contacts), a record with the wanted id
    /// that does not parse is an error rather than skipped, so callers never
    /// mistake an unreadable record for a missing one.
    ///
    /// # Errors
    ///
    /// - [`SipgateError::Deserialize`] if the record with `id` is malformed.
    /// - [`SipgateError::Api`] on a non-2xx response.
    /// - [`SipgateError::Http`] on network failure.
    pub async fn find_contact(
        &self,
        id: &str,
        scope: ScopeFilter,
    ) -> Result<Option<Contact>, SipgateError> {
        for item in self.fetch_items().await? {
            if item.get("id").and_then(serde_json::Value::as_str) != Some(id) {
                continue;
            }
            let contact: Contact =
                serde_json::from_value(item).map_err(|e| SipgateError::Deserialize {
                    context: format!("contact {id}"),
                    source: e,
                })?;
            if scope.matches(contact.scope) {
                return Ok(Some(contact));
            }
        }
        Ok(None)
    }

    /// Pages through `GET /contacts` until `totalCount` records have been read
    /// or the server returns an empty page, returning the raw items.
    async fn fetch_items(&self) -> Result<Vec<serde_json::Value>, SipgateError> {
        let limit = self.page_size.to_string();
        let mut offset: u64 = 0;
        let mut items = Vec::new();

        loop {
            let offset_str = offset.to_string();
            let url = self.build_url(
                &["contacts"],
                &[("offset", &offset_str), ("limit", &limit)],
            );
            let response = self.send(Method::GET, url, None).await?;
            let body = response.text().await?;
            let page: ContactsPage =
                serde_json::from_str(&body).map_err(|e| SipgateError::Deserialize {
                    context: format!("GET contacts(offset={offset})"),
                    source: e,
                })?;

            let fetched = page.items.len() as u64;
            offset += fetched;
            items.extend(page.items);

            if fetched == 0 || offset >= page.total_count {
                break;
            }
        }

        Ok(items)
    }

    /// Writes `contact` with `PUT /contacts/{id}`. sipgate creates the contact
    /// when the id is new.
    ///
    /// # Errors
    ///
    /// - [`SipgateError::Api`] on a non-2xx response.
    /// - [`SipgateError::Http`] on network failure.
    pub async fn update_contact(&self, contact: &Contact) -> Result<(), SipgateError> {
        let url = self.build_url(&["contacts", &contact.id], &[]);
        self.send(Method::PUT, url, Some(contact)).await?;
        Ok(())
    }

    /// Deletes a contact with `DELETE /contacts/{id}`.
    ///
    /// # Errors
    ///
    /// - [`SipgateError::Api`] on a non-2xx response.
    /// - [`SipgateError::Http`] on network failure.
    pub async fn delete_contact(&self, id: &str) -> Result<(), SipgateError> {
        let url = self.build_url(&["contacts", id], &[]);
        self.send(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// Appends percent-encoded path segments and query pairs to the base URL.
    fn build_url(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&Contact>,
    ) -> Result<Response, SipgateError> {
        tracing::debug!(%method, %url, "sipgate request");
        let mut request = self
            .http
            .request(method, url)
            .basic_auth(&self.credentials.token_id, Some(&self.credentials.token));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        Self::check_status(response).await
    }

    /// Turns a non-2xx response into [`SipgateError::Api`].
    ///
    /// The message is the JSON `message` field when the body has one,
    /// otherwise the trimmed body, otherwise the status reason phrase.
    async fn check_status(response: Response) -> Result<Response, SipgateError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_owned)
            })
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    status.canonical_reason().unwrap_or("unknown error").to_owned()
                } else {
                    trimmed.to_owned()
                }
            });

        Err(SipgateError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> SipgateClient {
        SipgateClient::with_base_url(SipgateCredentials::new("token-id", "token"), 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_appends_to_versioned_base() {
        let client = test_client("https://api.sipgate.com/v2");
        let url = client.build_url(&["contacts"], &[("offset", "0"), ("limit", "10")]);
        assert_eq!(
            url.as_str(),
            "https://api.sipgate.com/v2/contacts?offset=0&limit=10"
        );
    }

    #[test]
    fn build_url_handles_trailing_slash_and_root_base() {
        let client = test_client("http://localhost:4010/");
        let url = client.build_url(&["contacts", "abc"], &[]);
        assert_eq!(url.as_str(), "http://localhost:4010/contacts/abc");
    }

    #[test]
    fn build_url_encodes_path_segments() {
        let client = test_client("https://api.sipgate.com/v2/");
        let url = client.build_url(&["contacts", "a/b c"], &[]);
        assert_eq!(url.as_str(), "https://api.sipgate.com/v2/contacts/a%2Fb%20c");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = SipgateClient::with_base_url(SipgateCredentials::new("a", "b"), 30, "not a url")
            .unwrap_err();
        assert!(matches!(err, SipgateError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn page_size_is_at_least_one() {
        let client = test_client("https://api.sipgate.com/v2").with_page_size(0);
        assert_eq!(client.page_size, 1);
    }

    #[test]
    fn credentials_debug_redacts_token() {
        let rendered = format!("{:?}", SipgateCredentials::new("token-id", "s3cret"));
        assert!(rendered.contains("token-id"));
        assert!(!rendered.contains("s3cret"));
    }
}
