//! Contact store.
//!
//! # Invariants
//! - Ids are unique across the list at all times.
//! - New contacts are inserted at the front (most recent first).
//! - Only this type mutates the list; callers get shared slices.
//! - A persistence failure never rolls back the in-memory mutation.

use crate::model::contact::{Contact, ContactDraft, ContactId, ContactPatch};
use crate::storage::contact_storage::ContactStorage;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Prompt shown before a contact is removed.
pub const DELETE_PROMPT: &str = "Delete this contact?";

pub type StoreResult<T> = Result<T, StoreError>;

/// Semantic store failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound(ContactId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
        }
    }
}

impl Error for StoreError {}

/// Whether the write that followed a mutation reached storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    Saved,
    /// Storage rejected the write; the change lives only in memory.
    Failed(String),
}

impl Persistence {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// A completed mutation and the fate of its write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation<T> {
    pub value: T,
    pub persistence: Persistence,
}

/// Result of [`ContactStore::delete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined; nothing changed and nothing was written.
    Declined,
    /// The list was filtered and written. `value` is `None` when no contact
    /// had the id.
    Deleted(Mutation<Option<Contact>>),
}

/// Destructive-action confirmation.
pub trait ConfirmGate {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> ConfirmGate for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Exclusive owner of the contact list.
pub struct ContactStore<S: ContactStorage> {
    contacts: Vec<Contact>,
    storage: S,
    last_issued_id: u128,
}

impl<S: ContactStorage> ContactStore<S> {
    /// Wraps an initial list, typically the bootstrap loader's output.
    ///
    /// Does not write to storage.
    pub fn new(storage: S, contacts: Vec<Contact>) -> Self {
        Self {
            contacts,
            storage,
            last_issued_id: 0,
        }
    }

    /// Full list in display order.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.id == id)
    }

    /// Inserts a validated draft at the front with a fresh id.
    ///
    /// # Contract
    /// - `draft` must already have passed `validate_contact`.
    pub fn add(&mut self, draft: ContactDraft) -> Mutation<Contact> {
        let id = self.next_id();
        let contact = Contact::from_draft(id, draft);
        self.contacts.insert(0, contact.clone());
        info!(
            "event=store_add module=store status=ok count={}",
            self.contacts.len()
        );
        Mutation {
            value: contact,
            persistence: self.persist(),
        }
    }

    /// Merges `patch` onto the contact with `id`.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when no contact has `id`; nothing is written.
    pub fn update(&mut self, id: &str, patch: ContactPatch) -> StoreResult<Mutation<Contact>> {
        let Some(contact) = self.contacts.iter_mut().find(|contact| contact.id == id) else {
            warn!("event=store_update module=store status=error error_code=not_found");
            return Err(StoreError::NotFound(id.to_string()));
        };
        contact.apply_patch(patch);
        let updated = contact.clone();
        info!(
            "event=store_update module=store status=ok count={}",
            self.contacts.len()
        );
        Ok(Mutation {
            value: updated,
            persistence: self.persist(),
        })
    }

    /// Removes the contact with `id` after confirmation.
    ///
    /// An unknown id is tolerated: the list is unchanged but still written.
    pub fn delete<G>(&mut self, id: &str, gate: &mut G) -> DeleteOutcome
    where
        G: ConfirmGate + ?Sized,
    {
        if !gate.confirm(DELETE_PROMPT) {
            info!("event=store_delete module=store status=declined");
            return DeleteOutcome::Declined;
        }

        let removed = self
            .contacts
            .iter()
            .position(|contact| contact.id == id)
            .map(|index| self.contacts.remove(index));
        info!(
            "event=store_delete module=store status=ok removed={} count={}",
            removed.is_some(),
            self.contacts.len()
        );
        DeleteOutcome::Deleted(Mutation {
            value: removed,
            persistence: self.persist(),
        })
    }

    fn persist(&self) -> Persistence {
        match self.storage.save(&self.contacts) {
            Ok(()) => Persistence::Saved,
            Err(err) => {
                warn!("event=store_persist module=store status=error error={err}");
                Persistence::Failed(err.to_string())
            }
        }
    }

    /// Millisecond timestamp, bumped past the last issued id and any id
    /// already in the list.
    fn next_id(&mut self) -> ContactId {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis());
        let mut candidate = now_ms.max(self.last_issued_id.saturating_add(1));
        while self.contains_id(&candidate.to_string()) {
            candidate += 1;
        }
        self.last_issued_id = candidate;
        candidate.to_string()
    }

    fn contains_id(&self, id: &str) -> bool {
        self.contacts.iter().any(|contact| contact.id == id)
    }
}
