//! Initial contact list selection.
//!
//! # Invariants
//! - A stored list, even an empty one, always wins.
//! - A successful remote fetch is persisted immediately; the built-in
//!   fallback is not.
//! - The returned list never contains duplicate ids. Storage hands back
//!   normalized lists; fetched entries are normalized here.

use crate::bootstrap::remote::RemoteSource;
use crate::model::contact::{normalize_records, Contact};
use crate::storage::contact_storage::ContactStorage;
use log::{info, warn};

/// Which source produced the initial list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Storage,
    Remote,
    Defaults,
}

impl LoadSource {
    fn as_str(self) -> &'static str {
        match self {
            Self::Storage => "storage",
            Self::Remote => "remote",
            Self::Defaults => "defaults",
        }
    }
}

/// Result of the startup decision chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOutcome {
    pub contacts: Vec<Contact>,
    pub source: LoadSource,
}

/// Built-in sample contacts used when nothing else is available.
pub fn default_contacts() -> Vec<Contact> {
    vec![
        sample("1", "Alice Johnson", "+91 98765 43210", "alice@example.com"),
        sample("2", "Bob Kumar", "+91 98765 11223", "bob@example.net"),
        sample("3", "Carol Singh", "+91 98400 22334", "carol@example.org"),
    ]
}

/// Runs the storage → remote → defaults chain once.
///
/// `remote` is optional; without it the chain collapses to storage or
/// defaults.
///
/// # Side effects
/// - Calls `storage.save` only after a successful remote fetch. A failed
///   save is logged and the fetched list is still used.
pub fn load_initial_contacts<S>(storage: &S, remote: Option<&dyn RemoteSource>) -> BootstrapOutcome
where
    S: ContactStorage + ?Sized,
{
    let outcome = run_chain(storage, remote);
    info!(
        "event=bootstrap_load module=bootstrap status=ok source={} count={}",
        outcome.source.as_str(),
        outcome.contacts.len()
    );
    outcome
}

fn run_chain<S>(storage: &S, remote: Option<&dyn RemoteSource>) -> BootstrapOutcome
where
    S: ContactStorage + ?Sized,
{
    if let Some(stored) = storage.load() {
        return BootstrapOutcome {
            contacts: stored,
            source: LoadSource::Storage,
        };
    }

    let Some(remote) = remote else {
        return defaults_outcome();
    };

    match remote.fetch() {
        Ok(fetched) => {
            let normalized = normalize_records(fetched);
            if normalized.issued_ids > 0 {
                warn!(
                    "event=bootstrap_ids module=bootstrap status=repaired count={}",
                    normalized.issued_ids
                );
            }
            let contacts = normalized.contacts;
            if let Err(err) = storage.save(&contacts) {
                warn!(
                    "event=bootstrap_persist module=bootstrap status=error error={err}"
                );
            }
            BootstrapOutcome {
                contacts,
                source: LoadSource::Remote,
            }
        }
        Err(err) => {
            warn!(
                "event=remote_fetch module=bootstrap status=error fallback=defaults error={err}"
            );
            defaults_outcome()
        }
    }
}

fn defaults_outcome() -> BootstrapOutcome {
    BootstrapOutcome {
        contacts: default_contacts(),
        source: LoadSource::Defaults,
    }
}

fn sample(id: &str, name: &str, phone: &str, email: &str) -> Contact {
    Contact {
        id: id.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::default_contacts;
    use crate::model::contact::ContactDraft;
    use crate::model::validation::validate_contact;
    use std::collections::HashSet;

    #[test]
    fn defaults_are_three_valid_contacts() {
        let defaults = default_contacts();
        assert_eq!(defaults.len(), 3);
        for contact in &defaults {
            let draft = ContactDraft::new(&contact.name, &contact.phone, &contact.email);
            assert!(validate_contact(&draft).is_ok(), "{}", contact.name);
        }
        let ids: HashSet<_> = defaults.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
    }
}
