//! Form-boundary validation for candidate contacts.
//!
//! # Invariants
//! - Rules are checked in order (name, then phone); the first failure wins.
//! - Email is never validated.

use crate::model::contact::ContactDraft;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const MIN_NAME_CHARS: usize = 2;

// ASCII digits only; `\d` would also admit other Unicode decimal digits.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9\s-]{4,}$").expect("valid phone regex"));

/// Reason a candidate contact was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    NameTooShort,
    InvalidPhone,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameTooShort => write!(f, "Name should be at least 2 characters."),
            Self::InvalidPhone => write!(f, "Phone number appears invalid."),
        }
    }
}

impl Error for ValidationError {}

/// Checks name and phone of a candidate contact.
pub fn validate_contact(draft: &ContactDraft) -> Result<(), ValidationError> {
    if draft.name.trim().chars().count() < MIN_NAME_CHARS {
        return Err(ValidationError::NameTooShort);
    }
    if !PHONE_RE.is_match(&draft.phone) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}
