//! In-memory contact list and its mutation use-cases.
//!
//! # Responsibility
//! - Own the canonical ordered contact list.
//! - Persist the whole list after every mutation.
//!
//! # See also
//! - `crate::controller` for the notifications and re-render that follow.

pub mod contact_store;
