//! Core logic for the phonebook contact manager.
//! This crate is the single source of truth for contact invariants.

pub mod bootstrap;
pub mod config;
pub mod controller;
pub mod db;
pub mod logging;
pub mod model;
pub mod render;
pub mod search;
pub mod storage;
pub mod store;
pub mod view;

pub use bootstrap::loader::{default_contacts, load_initial_contacts, BootstrapOutcome, LoadSource};
pub use bootstrap::remote::{HttpRemoteSource, RemoteLoadError, RemoteSource};
pub use config::{ConfigError, LoggingConfig, PhonebookConfig};
pub use controller::{ContactController, FormInput, FormMode, PERSIST_WARNING};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::contact::{
    normalize_records, Contact, ContactDraft, ContactId, ContactPatch, ContactRecord,
    NormalizedContacts,
};
pub use model::validation::{validate_contact, ValidationError};
pub use render::{escape_html, render_contacts, RenderedTable};
pub use search::filter::filter_contacts;
pub use storage::contact_storage::{
    ContactStorage, SqliteContactStorage, StorageError, StorageResult, CONTACTS_STORAGE_KEY,
};
pub use store::contact_store::{
    ConfirmGate, ContactStore, DeleteOutcome, Mutation, Persistence, StoreError, StoreResult,
};
pub use view::{ContactView, FormState, HtmlContactView, Notice, NoticeKind};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
