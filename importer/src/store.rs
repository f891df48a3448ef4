use crate::storage::{LocalStorage, StorageError};
use shared_types::StoredContact;
use std::sync::Arc;
use tracing::debug;

pub const IMPORTED_CONTACTS_KEY: &str = "importedContacts";

/// Append-only list of saved contacts, persisted under a single key.
#[derive(Clone)]
pub struct ContactStore {
    storage: Arc<LocalStorage>,
}

impl ContactStore {
    pub fn new(storage: Arc<LocalStorage>) -> Self {
        Self { storage }
    }

    pub fn append(&self, contact: StoredContact) -> Result<(), StorageError> {
        self.append_many(vec![contact]).map(|_| ())
    }

    /// Appends all contacts in one write. Returns the new list length.
    pub fn append_many(&self, contacts: Vec<StoredContact>) -> Result<usize, StorageError> {
        let added = contacts.len();
        let list = self
            .storage
            .update(IMPORTED_CONTACTS_KEY, |current: Option<Vec<StoredContact>>| {
                let mut list = current.unwrap_or_default();
                list.extend(contacts);
                list
            })?;

        debug!("Stored {} contacts, {} total", added, list.len());
        Ok(list.len())
    }

    pub fn list(&self) -> Result<Vec<StoredContact>, StorageError> {
        Ok(self
            .storage
            .get::<Vec<StoredContact>>(IMPORTED_CONTACTS_KEY)?
            .unwrap_or_default())
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(IMPORTED_CONTACTS_KEY)
    }
}
