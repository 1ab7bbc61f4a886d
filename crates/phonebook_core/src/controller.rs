//! Interaction controller: maps user events onto store, validator and view.
//!
//! # Responsibility
//! - Track the add/edit form state machine.
//! - Re-render and notify after every store call.
//!
//! # Invariants
//! - Invalid input never reaches the store and never changes mode.
//! - A valid submit always returns the form to add mode, whatever the
//!   store outcome.
//! - Delete clicks never change the form mode.
//! - The rendered count always reflects the full store.

use crate::model::contact::{ContactDraft, ContactId};
use crate::model::validation::validate_contact;
use crate::search::filter::filter_contacts;
use crate::storage::contact_storage::ContactStorage;
use crate::store::contact_store::{
    ConfirmGate, ContactStore, DeleteOutcome, Persistence, StoreError,
};
use crate::view::{ContactView, FormState, Notice};

/// Shown when a write after a mutation fails.
pub const PERSIST_WARNING: &str = "Could not save locally. Your changes may be lost.";

/// Form mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Add,
    Edit { id: ContactId },
}

/// Raw form field text as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormInput {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl FormInput {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }
}

/// Event handler with injected store, view and confirmation gate.
pub struct ContactController<S, V, G>
where
    S: ContactStorage,
    V: ContactView,
    G: ConfirmGate,
{
    store: ContactStore<S>,
    view: V,
    gate: G,
    mode: FormMode,
    query: String,
}

impl<S, V, G> ContactController<S, V, G>
where
    S: ContactStorage,
    V: ContactView,
    G: ConfirmGate,
{
    pub fn new(store: ContactStore<S>, view: V, gate: G) -> Self {
        Self {
            store,
            view,
            gate,
            mode: FormMode::Add,
            query: String::new(),
        }
    }

    /// Initial render once bootstrap loading has finished.
    pub fn start(&mut self) {
        self.reset_form();
        self.refresh();
        self.view.clear_notice();
    }

    pub fn store(&self) -> &ContactStore<S> {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Form submit in either mode.
    pub fn submit(&mut self, input: FormInput) {
        let draft = ContactDraft::new(&input.name, &input.phone, &input.email);
        if let Err(err) = validate_contact(&draft) {
            self.view.show_form_error(Some(&err.to_string()));
            return;
        }
        self.view.show_form_error(None);

        match std::mem::take(&mut self.mode) {
            FormMode::Edit { id } => match self.store.update(&id, draft.into_patch()) {
                Ok(mutation) => self.after_mutation("Contact updated.", &mutation.persistence),
                Err(StoreError::NotFound(_)) => {
                    self.view
                        .notify(Notice::error("Update failed: Contact not found"));
                }
            },
            FormMode::Add => {
                let mutation = self.store.add(draft);
                self.after_mutation("Contact added.", &mutation.persistence);
            }
        }

        self.reset_form();
    }

    /// "Edit" clicked on a row.
    pub fn edit_clicked(&mut self, id: &str) {
        let Some(contact) = self.store.find_by_id(id) else {
            self.view.notify(Notice::error("Contact not found"));
            return;
        };
        let form = FormState::edit(contact);
        self.mode = FormMode::Edit {
            id: contact.id.clone(),
        };
        self.view.show_form(&form);
    }

    /// "Delete" clicked on a row. Independent of the form mode.
    pub fn delete_clicked(&mut self, id: &str) {
        match self.store.delete(id, &mut self.gate) {
            DeleteOutcome::Declined => {}
            DeleteOutcome::Deleted(mutation) => {
                self.after_mutation("Contact deleted.", &mutation.persistence);
            }
        }
    }

    /// Search box input.
    pub fn search_input(&mut self, query: &str) {
        self.query = query.to_string();
        self.refresh();
    }

    pub fn clear_search(&mut self) {
        self.query.clear();
        self.refresh();
    }

    /// Abandons an edit without touching the store.
    pub fn cancel(&mut self) {
        self.reset_form();
    }

    fn after_mutation(&mut self, success: &str, persistence: &Persistence) {
        self.refresh();
        match persistence {
            Persistence::Saved => self.view.notify(Notice::info(success)),
            Persistence::Failed(_) => self.view.notify(Notice::error(PERSIST_WARNING)),
        }
    }

    fn refresh(&mut self) {
        let visible = filter_contacts(self.store.contacts(), &self.query);
        self.view.render(&visible, self.store.len());
    }

    fn reset_form(&mut self) {
        self.mode = FormMode::Add;
        self.view.show_form(&FormState::add());
        self.view.show_form_error(None);
    }
}
