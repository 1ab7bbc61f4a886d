//! Contact domain model.
//!
//! # Responsibility
//! - Define the record persisted under the contacts storage key.
//! - Decode loosely shaped stored or fetched entries and normalize them
//!   into contacts with unique ids.
//! - Provide merge helpers for partial updates.
//!
//! # Invariants
//! - `id` is assigned once and never changes afterwards.
//! - `email` is stored as an empty string when absent, never as `null`.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Stable identifier for a contact.
///
/// Opaque string: timestamp-derived for contacts created locally, taken
/// verbatim (or UUID-assigned) for bootstrapped ones.
pub type ContactId = String;

/// Canonical contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone: String,
    /// Free-form, never validated. Empty when the user left it blank.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
}

impl Contact {
    /// Builds a contact from an accepted draft and a freshly issued id.
    pub fn from_draft(id: impl Into<ContactId>, draft: ContactDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            phone: draft.phone,
            email: draft.email,
        }
    }

    /// Merges `patch` onto this record, keeping `id` and every field the
    /// patch leaves as `None`.
    pub fn apply_patch(&mut self, patch: ContactPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
    }
}

/// Candidate contact as entered in the form, before an id exists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl ContactDraft {
    /// Creates a draft from raw form text, trimming every field.
    pub fn new(name: &str, phone: &str, email: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
            email: email.trim().to_string(),
        }
    }

    /// Converts the draft into a full-replacement patch.
    pub fn into_patch(self) -> ContactPatch {
        ContactPatch {
            name: Some(self.name),
            phone: Some(self.phone),
            email: Some(self.email),
        }
    }
}

/// Partial update. `None` keeps the existing value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl ContactPatch {
    /// Patch replacing only the name.
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Loosely shaped contact as found in a stored value or a remote payload.
///
/// `id` may be missing, blank or numeric; text fields may be missing or
/// `null`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ContactRecord {
    #[serde(default, deserialize_with = "id_as_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Contacts built from records, with a count of ids that had to be issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedContacts {
    pub contacts: Vec<Contact>,
    /// Records without an id plus later duplicates of an earlier id.
    pub issued_ids: usize,
}

/// Converts records into contacts, keeping order.
///
/// The first occurrence of an id keeps it; missing ids and later duplicates
/// get a fresh UUID v4.
pub fn normalize_records(records: Vec<ContactRecord>) -> NormalizedContacts {
    let mut seen = HashSet::with_capacity(records.len());
    let mut issued_ids = 0usize;
    let contacts = records
        .into_iter()
        .map(|record| {
            let id = match record.id {
                Some(id) if seen.insert(id.clone()) => id,
                _ => {
                    issued_ids += 1;
                    let fresh = Uuid::new_v4().to_string();
                    seen.insert(fresh.clone());
                    fresh
                }
            };
            Contact {
                id,
                name: record.name,
                phone: record.phone,
                email: record.email.unwrap_or_default(),
            }
        })
        .collect();
    NormalizedContacts {
        contacts,
        issued_ids,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

fn id_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw.and_then(|id| {
        let text = match id {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        };
        (!text.trim().is_empty()).then_some(text)
    }))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::{normalize_records, Contact, ContactDraft, ContactPatch, ContactRecord};

    #[test]
    fn draft_trims_all_fields() {
        let draft = ContactDraft::new("  Jo ", " 12345\n", "   ");
        assert_eq!(draft.name, "Jo");
        assert_eq!(draft.phone, "12345");
        assert_eq!(draft.email, "");
    }

    #[test]
    fn patch_keeps_untouched_fields_and_id() {
        let mut contact = Contact::from_draft("7", ContactDraft::new("Jo", "12345", "jo@x.io"));
        contact.apply_patch(ContactPatch::name("X"));
        assert_eq!(contact.id, "7");
        assert_eq!(contact.name, "X");
        assert_eq!(contact.phone, "12345");
        assert_eq!(contact.email, "jo@x.io");
    }

    #[test]
    fn missing_or_null_email_deserializes_as_empty() {
        let missing: Contact =
            serde_json::from_str(r#"{"id":"1","name":"Al","phone":"12345"}"#).unwrap();
        assert_eq!(missing.email, "");

        let null: Contact =
            serde_json::from_str(r#"{"id":"1","name":"Al","phone":"12345","email":null}"#)
                .unwrap();
        assert_eq!(null.email, "");
    }

    fn record(id: Option<&str>, name: &str) -> ContactRecord {
        ContactRecord {
            id: id.map(str::to_string),
            name: name.to_string(),
            phone: "12345".to_string(),
            email: None,
        }
    }

    #[test]
    fn record_accepts_numeric_blank_and_null_fields() {
        let records: Vec<ContactRecord> = serde_json::from_str(
            r#"[
                {"id":42,"name":"Bo","phone":"55555"},
                {"id":"","name":null,"phone":"66666","email":null}
            ]"#,
        )
        .unwrap();
        assert_eq!(records[0].id.as_deref(), Some("42"));
        assert_eq!(records[1].id, None);
        assert_eq!(records[1].name, "");
    }

    #[test]
    fn normalize_issues_ids_for_missing_and_duplicates() {
        let normalized = normalize_records(vec![
            record(Some("1"), "First"),
            record(None, "Anonymous"),
            record(Some("1"), "Copy"),
        ]);

        assert_eq!(normalized.issued_ids, 2);
        assert_eq!(normalized.contacts[0].id, "1");
        assert_ne!(normalized.contacts[1].id, "1");
        assert_ne!(normalized.contacts[2].id, "1");
        assert_ne!(normalized.contacts[1].id, normalized.contacts[2].id);
        assert_eq!(normalized.contacts[2].name, "Copy");
        assert_eq!(normalized.contacts[1].email, "");
    }

    #[test]
    fn normalize_keeps_clean_records_verbatim() {
        let normalized = normalize_records(vec![record(Some("a"), "Al"), record(Some("b"), "Bo")]);
        assert_eq!(normalized.issued_ids, 0);
        let ids: Vec<_> = normalized.contacts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
