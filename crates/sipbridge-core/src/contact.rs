//! Canonical contact shapes exchanged with the bridge host.
//!
//! All types serialize as camelCase JSON (`firstName`, `phoneNumbers`, ...).
//! Nullable bridge fields are modelled as `Option<String>` and default to
//! `None` when absent from an incoming payload.

use serde::{Deserialize, Serialize};

/// Semantic label attached to a canonical phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhoneNumberLabel {
    Work,
    Mobile,
    Home,
    #[serde(rename = "HOMEFAX")]
    HomeFax,
    #[serde(rename = "WORKFAX")]
    WorkFax,
    #[serde(rename = "OTHERFAX")]
    OtherFax,
    Pager,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    pub label: PhoneNumberLabel,
    pub phone_number: String,
}

/// Contact fields supplied by the bridge when creating a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactTemplate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub phone_numbers: Vec<PhoneNumber>,
}

/// Contact fields supplied by the bridge when updating an existing contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactUpdate {
    pub id: String,
    #[serde(flatten)]
    pub fields: ContactTemplate,
}

/// The canonical contact returned to the bridge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub organization: Option<String>,
    pub contact_url: Option<String>,
    pub avatar_url: Option<String>,
    pub phone_numbers: Vec<PhoneNumber>,
}

impl ContactTemplate {
    /// Echoes the template back as a stored contact under `id`.
    #[must_use]
    pub fn into_contact(self, id: String, contact_url: Option<String>) -> Contact {
        Contact {
            id,
            name: self.name,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            organization: self.organization,
            contact_url,
            avatar_url: None,
            phone_numbers: self.phone_numbers,
        }
    }
}

impl ContactUpdate {
    #[must_use]
    pub fn into_contact(self, contact_url: Option<String>) -> Contact {
        self.fields.into_contact(self.id, contact_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_number_label_uses_bridge_wire_names() {
        let labels = [
            (PhoneNumberLabel::Work, "\"WORK\""),
            (PhoneNumberLabel::Mobile, "\"MOBILE\""),
            (PhoneNumberLabel::HomeFax, "\"HOMEFAX\""),
            (PhoneNumberLabel::WorkFax, "\"WORKFAX\""),
            (PhoneNumberLabel::OtherFax, "\"OTHERFAX\""),
            (PhoneNumberLabel::Pager, "\"PAGER\""),
        ];
        for (label, expected) in labels {
            assert_eq!(serde_json::to_string(&label).unwrap(), expected);
        }
    }

    #[test]
    fn contact_serializes_camel_case_fields() {
        let contact = Contact {
            id: "c-1".to_string(),
            first_name: Some("Ada".to_string()),
            phone_numbers: vec![PhoneNumber {
                label: PhoneNumberLabel::Mobile,
                phone_number: "+4915100000".to_string(),
            }],
            ..Contact::default()
        };
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["phoneNumbers"][0]["phoneNumber"], "+4915100000");
        assert_eq!(json["phoneNumbers"][0]["label"], "MOBILE");
        assert!(json["avatarUrl"].is_null());
    }

    #[test]
    fn contact_update_reads_id_alongside_template_fields() {
        let update: ContactUpdate = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "name": null,
            "firstName": "Grace",
            "lastName": "Hopper",
            "phoneNumbers": []
        }))
        .unwrap();
        assert_eq!(update.id, "abc");
        assert_eq!(update.fields.first_name.as_deref(), Some("Grace"));
        assert!(update.fields.name.is_none());
        assert!(update.fields.email.is_none());
    }

    #[test]
    fn template_into_contact_keeps_fields_and_clears_avatar() {
        let template = ContactTemplate {
            email: Some("ada@example.com".to_string()),
            ..ContactTemplate::default()
        };
        let contact = template.into_contact("id-1".to_string(), Some("https://x".to_string()));
        assert_eq!(contact.id, "id-1");
        assert_eq!(contact.email.as_deref(), Some("ada@example.com"));
        assert_eq!(contact.contact_url.as_deref(), Some("https://x"));
        assert!(contact.avatar_url.is_none());
    }
}
