//! Field mapping between sipgate contacts and canonical bridge contacts.
//!
//! The canonical model is flatter than sipgate's: one email, one organization
//! string and one label per phone number. Reading keeps the first of each;
//! writing merges with the previously stored sipgate record so data the bridge
//! cannot see (picture, addresses, type tags) is carried forward.

use sipbridge_core::{Contact, ContactTemplate, PhoneNumber, PhoneNumberLabel};
use sipbridge_sipgate::{Contact as SipgateContact, Email, Number, Scope};

/// Type tag written for emails and numbers without a stored counterpart.
pub const DEFAULT_TYPE_TAG: &str = "work";

/// Splits a full name at the first space into `(first, last)`.
///
/// Everything after the first space is the last name; a single-token name has
/// an empty last name.
#[must_use]
pub fn split_name(name: &str) -> (String, String) {
    match name.split_once(' ') {
        Some((first, last)) => (first.to_owned(), last.to_owned()),
        None => (name.to_owned(), String::new()),
    }
}

/// Maps sipgate number type tags onto a single canonical label.
///
/// Fax combinations win over everything else, then pager, cell, work, home
/// and other. Untagged or unrecognised numbers are `WORK`. Tags compare
/// ASCII case-insensitively.
#[must_use]
pub fn phone_label(types: &[String]) -> PhoneNumberLabel {
    let has = |tag: &str| types.iter().any(|t| t.eq_ignore_ascii_case(tag));

    if has("fax") {
        if has("work") {
            PhoneNumberLabel::WorkFax
        } else if has("home") {
            PhoneNumberLabel::HomeFax
        } else {
            PhoneNumberLabel::OtherFax
        }
    } else if has("pager") {
        PhoneNumberLabel::Pager
    } else if has("cell") {
        PhoneNumberLabel::Mobile
    } else if has("work") {
        PhoneNumberLabel::Work
    } else if has("home") {
        PhoneNumberLabel::Home
    } else if has("other") {
        PhoneNumberLabel::Other
    } else {
        PhoneNumberLabel::Work
    }
}

/// Only shared and private contacts are exposed to the bridge.
#[must_use]
pub fn is_listed(scope: Scope) -> bool {
    matches!(scope, Scope::Shared | Scope::Private)
}

/// Projects a sipgate contact onto the canonical bridge shape.
#[must_use]
pub fn to_canonical(contact: &SipgateContact, contact_url: &str) -> Contact {
    let (first_name, last_name) = split_name(&contact.name);
    let email = contact
        .emails
        .first()
        .map(|e| e.email.clone())
        .unwrap_or_default();
    let organization = contact
        .organization
        .first()
        .and_then(|parts| parts.first())
        .cloned()
        .unwrap_or_default();

    Contact {
        id: contact.id.clone(),
        name: Some(contact.name.clone()),
        first_name: Some(first_name),
        last_name: Some(last_name),
        email: Some(email),
        organization: Some(organization),
        contact_url: Some(contact_url.to_owned()),
        avatar_url: None,
        phone_numbers: contact
            .numbers
            .iter()
            .map(|n| PhoneNumber {
                label: phone_label(&n.types),
                phone_number: n.number.clone(),
            })
            .collect(),
    }
}

/// Picks the display name to store in sipgate.
///
/// An explicit non-empty `name` wins. Otherwise, if either first or last name
/// is non-empty, both are joined with a single space (an absent part counts as
/// empty, so `"Grace "` is possible). Otherwise empty.
#[must_use]
pub fn select_name(name: Option<&str>, first_name: Option<&str>, last_name: Option<&str>) -> String {
    if let Some(name) = name.filter(|n| !n.is_empty()) {
        return name.to_owned();
    }

    let first = first_name.unwrap_or_default();
    let last = last_name.unwrap_or_default();
    if first.is_empty() && last.is_empty() {
        String::new()
    } else {
        format!("{first} {last}")
    }
}

/// Builds the sipgate record to write for `id` from bridge-supplied fields.
///
/// Emails and organization are replaced wholesale: an absent email clears all
/// stored emails. Type tags of emails and numbers that already exist on
/// `existing` (exact string match) are kept; new or untagged ones get
/// `["work"]`. Picture
/// and addresses come from `existing` unchanged. Scope is always `SHARED`.
#[must_use]
pub fn to_provider_payload(
    id: &str,
    fields: &ContactTemplate,
    existing: Option<&SipgateContact>,
) -> SipgateContact {
    let default_types = || vec![DEFAULT_TYPE_TAG.to_owned()];

    let emails = fields
        .email
        .as_deref()
        .filter(|e| !e.is_empty())
        .map(|address| {
            let types = existing
                .and_then(|c| c.emails.iter().find(|e| e.email == address))
                .map(|e| e.types.clone())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(default_types);
            vec![Email {
                email: address.to_owned(),
                types,
            }]
        })
        .unwrap_or_default();

    let organization = fields
        .organization
        .as_deref()
        .filter(|o| !o.is_empty())
        .map(|org| vec![vec![org.to_owned(), String::new()]])
        .unwrap_or_default();

    let numbers = fields
        .phone_numbers
        .iter()
        .map(|p| {
            let types = existing
                .and_then(|c| c.numbers.iter().find(|n| n.number == p.phone_number))
                .map(|n| n.types.clone())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(default_types);
            Number {
                number: p.phone_number.clone(),
                types,
            }
        })
        .collect();

    SipgateContact {
        id: id.to_owned(),
        name: select_name(
            fields.name.as_deref(),
            fields.first_name.as_deref(),
            fields.last_name.as_deref(),
        ),
        picture: existing.and_then(|c| c.picture.clone()),
        emails,
        numbers,
        addresses: existing.map(|c| c.addresses.clone()).unwrap_or_default(),
        organization,
        scope: Scope::Shared,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sipbridge_sipgate::Address;

    const URL: &str = "https://app.sipgate.com/team/contacts";

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    fn stored_contact() -> SipgateContact {
        SipgateContact {
            id: "c-1".to_owned(),
            name: "Ada Lovelace".to_owned(),
            picture: Some("aGVsbG8=".to_owned()),
            emails: vec![Email {
                email: "ada@example.com".to_owned(),
                types: tags(&["home"]),
            }],
            numbers: vec![
                Number {
                    number: "+4915100000".to_owned(),
                    types: tags(&["cell"]),
                },
                Number {
                    number: "+4921100000".to_owned(),
                    types: tags(&["fax", "work"]),
                },
            ],
            addresses: vec![serde_json::from_value::<Address>(serde_json::json!({
                "streetAddress": "Gladbacher Str. 74",
                "locality": "Düsseldorf",
                "poBox": null
            }))
            .unwrap()],
            organization: vec![vec!["Analytical Engines".to_owned(), "R&D".to_owned()]],
            scope: Scope::Private,
        }
    }

    fn phone(label: PhoneNumberLabel, number: &str) -> PhoneNumber {
        PhoneNumber {
            label,
            phone_number: number.to_owned(),
        }
    }

    #[test]
    fn split_name_two_tokens() {
        assert_eq!(
            split_name("Ada Lovelace"),
            ("Ada".to_owned(), "Lovelace".to_owned())
        );
    }

    #[test]
    fn split_name_single_token_has_empty_last_name() {
        assert_eq!(split_name("Ada"), ("Ada".to_owned(), String::new()));
    }

    #[test]
    fn split_name_keeps_remainder_as_last_name() {
        assert_eq!(
            split_name("Ada King Lovelace"),
            ("Ada".to_owned(), "King Lovelace".to_owned())
        );
    }

    #[test]
    fn phone_label_fax_combinations() {
        assert_eq!(phone_label(&tags(&["work", "fax"])), PhoneNumberLabel::WorkFax);
        assert_eq!(phone_label(&tags(&["fax", "home"])), PhoneNumberLabel::HomeFax);
        assert_eq!(phone_label(&tags(&["fax"])), PhoneNumberLabel::OtherFax);
        assert_eq!(phone_label(&tags(&["fax", "other"])), PhoneNumberLabel::OtherFax);
    }

    #[test]
    fn phone_label_precedence_after_fax() {
        assert_eq!(phone_label(&tags(&["pager", "cell"])), PhoneNumberLabel::Pager);
        assert_eq!(phone_label(&tags(&["work", "cell"])), PhoneNumberLabel::Mobile);
        assert_eq!(phone_label(&tags(&["home", "work"])), PhoneNumberLabel::Work);
        assert_eq!(phone_label(&tags(&["home"])), PhoneNumberLabel::Home);
        assert_eq!(phone_label(&tags(&["other"])), PhoneNumberLabel::Other);
    }

    #[test]
    fn phone_label_defaults_to_work() {
        assert_eq!(phone_label(&[]), PhoneNumberLabel::Work);
        assert_eq!(phone_label(&tags(&["voip"])), PhoneNumberLabel::Work);
    }

    #[test]
    fn phone_label_ignores_tag_case() {
        assert_eq!(phone_label(&tags(&["WORK", "FAX"])), PhoneNumberLabel::WorkFax);
        assert_eq!(phone_label(&tags(&["Cell"])), PhoneNumberLabel::Mobile);
    }

    #[test]
    fn only_shared_and_private_are_listed() {
        assert!(is_listed(Scope::Shared));
        assert!(is_listed(Scope::Private));
        assert!(!is_listed(Scope::Internal));
        assert!(!is_listed(Scope::Unknown));
    }

    #[test]
    fn to_canonical_surfaces_first_email_and_organization() {
        let mut stored = stored_contact();
        stored.emails.push(Email {
            email: "second@example.com".to_owned(),
            types: tags(&["work"]),
        });
        stored.organization.push(vec!["Other Org".to_owned()]);

        let contact = to_canonical(&stored, URL);
        assert_eq!(contact.id, "c-1");
        assert_eq!(contact.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(contact.first_name.as_deref(), Some("Ada"));
        assert_eq!(contact.last_name.as_deref(), Some("Lovelace"));
        assert_eq!(contact.email.as_deref(), Some("ada@example.com"));
        assert_eq!(contact.organization.as_deref(), Some("Analytical Engines"));
        assert_eq!(contact.contact_url.as_deref(), Some(URL));
        assert!(contact.avatar_url.is_none());
        assert_eq!(
            contact.phone_numbers,
            vec![
                phone(PhoneNumberLabel::Mobile, "+4915100000"),
                phone(PhoneNumberLabel::WorkFax, "+4921100000"),
            ]
        );
    }

    #[test]
    fn to_canonical_defaults_missing_email_and_organization_to_empty() {
        let mut stored = stored_contact();
        stored.emails.clear();
        stored.organization = vec![vec![]];

        let contact = to_canonical(&stored, URL);
        assert_eq!(contact.email.as_deref(), Some(""));
        assert_eq!(contact.organization.as_deref(), Some(""));
    }

    #[test]
    fn select_name_joins_first_and_last_when_name_empty() {
        assert_eq!(
            select_name(Some(""), Some("Grace"), Some("Hopper")),
            "Grace Hopper"
        );
        assert_eq!(select_name(None, Some("Grace"), None), "Grace ");
        assert_eq!(select_name(None, Some(""), Some("Hopper")), " Hopper");
    }

    #[test]
    fn select_name_prefers_explicit_name() {
        assert_eq!(select_name(Some("Dr. Who"), Some("x"), Some("y")), "Dr. Who");
    }

    #[test]
    fn select_name_empty_when_nothing_given() {
        assert_eq!(select_name(None, None, None), "");
        assert_eq!(select_name(Some(""), Some(""), Some("")), "");
    }

    #[test]
    fn payload_without_existing_uses_defaults() {
        let fields = ContactTemplate {
            first_name: Some("Grace".to_owned()),
            last_name: Some("Hopper".to_owned()),
            email: Some("grace@example.com".to_owned()),
            organization: Some("Navy".to_owned()),
            phone_numbers: vec![phone(PhoneNumberLabel::Mobile, "+100")],
            ..ContactTemplate::default()
        };

        let payload = to_provider_payload("new-id", &fields, None);
        assert_eq!(payload.id, "new-id");
        assert_eq!(payload.name, "Grace Hopper");
        assert_eq!(payload.scope, Scope::Shared);
        assert_eq!(payload.emails.len(), 1);
        assert_eq!(payload.emails[0].types, tags(&["work"]));
        assert_eq!(
            payload.organization,
            vec![vec!["Navy".to_owned(), String::new()]]
        );
        assert_eq!(payload.numbers[0].types, tags(&["work"]));
        assert!(payload.picture.is_none());
        assert!(payload.addresses.is_empty());
    }

    #[test]
    fn payload_preserves_existing_tags_picture_and_addresses() {
        let stored = stored_contact();
        let fields = ContactTemplate {
            name: Some("Ada Lovelace".to_owned()),
            email: Some("ada@example.com".to_owned()),
            phone_numbers: vec![
                phone(PhoneNumberLabel::Work, "+4921100000"),
                phone(PhoneNumberLabel::Work, "+4930000000"),
            ],
            ..ContactTemplate::default()
        };

        let payload = to_provider_payload("c-1", &fields, Some(&stored));
        assert_eq!(payload.emails[0].types, tags(&["home"]));
        assert_eq!(payload.numbers[0].types, tags(&["fax", "work"]));
        assert_eq!(payload.numbers[1].types, tags(&["work"]));
        assert_eq!(payload.picture.as_deref(), Some("aGVsbG8="));
        assert_eq!(payload.addresses, stored.addresses);
        assert_eq!(payload.scope, Scope::Shared);
    }

    #[test]
    fn payload_without_email_clears_emails_and_organization() {
        let stored = stored_contact();
        let fields = ContactTemplate {
            name: Some("Ada".to_owned()),
            email: None,
            organization: Some(String::new()),
            ..ContactTemplate::default()
        };

        let payload = to_provider_payload("c-1", &fields, Some(&stored));
        assert!(payload.emails.is_empty());
        assert!(payload.organization.is_empty());
        assert!(payload.numbers.is_empty());
    }

    #[test]
    fn payload_untagged_stored_entries_get_default_tag() {
        let mut stored = stored_contact();
        stored.emails[0].types.clear();
        stored.numbers[0].types.clear();
        let fields = ContactTemplate {
            email: Some("ada@example.com".to_owned()),
            phone_numbers: vec![phone(PhoneNumberLabel::Mobile, "+4915100000")],
            ..ContactTemplate::default()
        };

        let payload = to_provider_payload("c-1", &fields, Some(&stored));
        assert_eq!(payload.emails[0].types, tags(&["work"]));
        assert_eq!(payload.numbers[0].types, tags(&["work"]));
        assert_eq!(payload.addresses[0].0.get("poBox"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn payload_new_email_address_gets_default_tag() {
        let stored = stored_contact();
        let fields = ContactTemplate {
            email: Some("new@example.com".to_owned()),
            ..ContactTemplate::default()
        };

        let payload = to_provider_payload("c-1", &fields, Some(&stored));
        assert_eq!(payload.emails[0].email, "new@example.com");
        assert_eq!(payload.emails[0].types, tags(&["work"]));
    }
}
