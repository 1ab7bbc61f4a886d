#![allow(dead_code)]

use phonebook_core::db::DbError;
use phonebook_core::{
    Contact, ContactRecord, ContactStorage, RemoteLoadError, RemoteSource, StorageError,
    StorageResult,
};
use std::cell::{Cell, RefCell};

/// In-memory storage that records every save.
#[derive(Default)]
pub struct RecordingStorage {
    pub stored: RefCell<Option<Vec<Contact>>>,
    pub saves: Cell<usize>,
}

impl RecordingStorage {
    pub fn with_stored(contacts: Vec<Contact>) -> Self {
        Self {
            stored: RefCell::new(Some(contacts)),
            saves: Cell::new(0),
        }
    }
}

impl ContactStorage for RecordingStorage {
    fn save(&self, contacts: &[Contact]) -> StorageResult<()> {
        self.saves.set(self.saves.get() + 1);
        *self.stored.borrow_mut() = Some(contacts.to_vec());
        Ok(())
    }

    fn load(&self) -> Option<Vec<Contact>> {
        self.stored.borrow().clone()
    }
}

/// Storage whose writes always fail, like a full or disabled store.
#[derive(Default)]
pub struct FailingStorage {
    pub attempts: Cell<usize>,
}

impl ContactStorage for FailingStorage {
    fn save(&self, _contacts: &[Contact]) -> StorageResult<()> {
        self.attempts.set(self.attempts.get() + 1);
        Err(StorageError::Db(DbError::Sqlite(rusqlite::Error::InvalidQuery)))
    }

    fn load(&self) -> Option<Vec<Contact>> {
        None
    }
}

/// Remote source with a canned answer.
pub struct FakeRemote {
    pub response: RefCell<Option<Result<Vec<ContactRecord>, RemoteLoadError>>>,
    pub calls: Cell<usize>,
}

impl FakeRemote {
    pub fn ok(contacts: Vec<ContactRecord>) -> Self {
        Self::answering(Ok(contacts))
    }

    pub fn failing(err: RemoteLoadError) -> Self {
        Self::answering(Err(err))
    }

    fn answering(response: Result<Vec<ContactRecord>, RemoteLoadError>) -> Self {
        Self {
            response: RefCell::new(Some(response)),
            calls: Cell::new(0),
        }
    }
}

impl RemoteSource for FakeRemote {
    fn fetch(&self) -> Result<Vec<ContactRecord>, RemoteLoadError> {
        self.calls.set(self.calls.get() + 1);
        self.response
            .borrow_mut()
            .take()
            .unwrap_or_else(|| Err(RemoteLoadError::Transport("already fetched".to_string())))
    }
}

pub fn contact(id: &str, name: &str, phone: &str, email: &str) -> Contact {
    Contact {
        id: id.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
    }
}

pub fn remote(id: Option<&str>, name: &str, phone: &str) -> ContactRecord {
    ContactRecord {
        id: id.map(str::to_string),
        name: name.to_string(),
        phone: phone.to_string(),
        email: None,
    }
}
