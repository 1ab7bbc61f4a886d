//! Contact domain model and input validation.
//!
//! # Responsibility
//! - Define the canonical contact record shared by storage, store and view.
//! - Define form-side input shapes (`ContactDraft`, `ContactPatch`).
//! - Validate candidate contacts before they reach the store.
//!
//! # Invariants
//! - Every contact is identified by a stable `ContactId`.
//! - Deletion is a hard removal from the list; there are no tombstones.

pub mod contact;
pub mod validation;
