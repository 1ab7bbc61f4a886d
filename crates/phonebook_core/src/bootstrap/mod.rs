//! Startup loading of the initial contact list.
//!
//! # Responsibility
//! - Pick the initial list from storage, a one-shot remote fetch or the
//!   built-in sample set, in that order.
//! - Guarantee the list handed to the store has unique ids.
//!
//! # Invariants
//! - Loading never fails; the worst case is the built-in defaults.
//! - Only a successful remote fetch triggers a write to storage.

pub mod loader;
pub mod remote;
