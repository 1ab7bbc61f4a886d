//! Substring filter over name and phone.
//!
//! # Invariants
//! - A blank query yields the full list in its original order.
//! - Matching is case-insensitive; `email` is never searched.
//! - Result order follows input order.

use crate::model::contact::Contact;

/// Normalized search text; `None` for blank input.
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// Returns whether `contact` matches an already-normalized needle.
pub fn matches(contact: &Contact, needle: &str) -> bool {
    contact.name.to_lowercase().contains(needle) || contact.phone.to_lowercase().contains(needle)
}

/// Filters `contacts` by `query`, returning owned copies.
pub fn filter_contacts(contacts: &[Contact], query: &str) -> Vec<Contact> {
    match normalize_query(query) {
        None => contacts.to_vec(),
        Some(needle) => contacts
            .iter()
            .filter(|contact| matches(contact, &needle))
            .cloned()
            .collect(),
    }
}
