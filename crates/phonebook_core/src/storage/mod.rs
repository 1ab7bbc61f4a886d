//! Persistence adapter for the contact list.
//!
//! # Responsibility
//! - Define the storage contract used by the store and the bootstrap loader.
//! - Keep SQL and JSON encoding details inside the persistence boundary.
//!
//! # Invariants
//! - The whole list is written as one value under one key; there are no
//!   per-contact rows.
//! - Read failures degrade to "absent" instead of surfacing as errors.

pub mod contact_storage;
