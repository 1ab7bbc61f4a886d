//! Contact search.
//!
//! # Responsibility
//! - Derive the visible subset of contacts for a search box query.
//! - Never mutate the store's list.

pub mod filter;
