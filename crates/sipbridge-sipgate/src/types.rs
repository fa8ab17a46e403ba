//! sipgate contacts API types.
//!
//! These model the JSON the `/contacts` endpoints read and write. The same
//! [`Contact`] shape is returned by the list endpoint and accepted by `PUT
//! /contacts/{id}`, so a fetched record can be modified and written back.

use serde::{Deserialize, Deserializer, Serialize};

/// Reads `null` as the type's default. sipgate sends `null` for empty lists
/// and names on some records.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Visibility of a contact inside a sipgate account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scope {
    Private,
    Shared,
    Internal,
    /// Any scope this client does not know about.
    #[serde(other)]
    Unknown,
}

/// Scope selection for [`crate::SipgateClient::get_contacts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeFilter {
    All,
    Only(Scope),
}

impl ScopeFilter {
    #[must_use]
    pub fn matches(self, scope: Scope) -> bool {
        match self {
            ScopeFilter::All => true,
            ScopeFilter::Only(wanted) => wanted == scope,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub email: String,
    /// Type tags such as `"work"` or `"home"`.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Number {
    pub number: String,
    /// Type tags such as `"cell"`, `"work"` or `"fax"`.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub types: Vec<String>,
}

/// A postal address, kept as the raw JSON object so every key, including
/// explicit `null`s, survives a read/write cycle unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub serde_json::Map<String, serde_json::Value>);

impl Address {
    /// String value of `key` (e.g. `"streetAddress"`, `"locality"`).
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(serde_json::Value::as_str)
    }
}

/// A sipgate contact record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Base64 picture data, `null` when the contact has none.
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub emails: Vec<Email>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub numbers: Vec<Number>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub addresses: Vec<Address>,
    /// Organization name components, e.g. `[["sipgate", "Support"]]`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub organization: Vec<Vec<String>>,
    pub scope: Scope,
}

/// One page of `GET /contacts`.
///
/// Items are kept as raw JSON so a single malformed record can be skipped
/// without failing the whole listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactsPage {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
    #[serde(default)]
    pub total_count: u64,
}
