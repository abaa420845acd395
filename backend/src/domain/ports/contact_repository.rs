//! Port abstraction for contact persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Contact, ContactId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by contact repository adapters.
    pub enum ContactPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "contact repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "contact repository query failed: {message}",
    }
}

/// Contact storage. Every mutating call is committed before it returns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Contacts owned by `owner`, oldest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Contact>, ContactPersistenceError>;

    /// Contact `id` when it exists and belongs to `owner`.
    async fn find_by_id(
        &self,
        owner: &UserId,
        id: &ContactId,
    ) -> Result<Option<Contact>, ContactPersistenceError>;

    /// Store a new contact.
    async fn insert(&self, contact: &Contact) -> Result<(), ContactPersistenceError>;

    /// Overwrite the editable fields of an existing contact.
    async fn update(&self, contact: &Contact) -> Result<(), ContactPersistenceError>;

    /// Remove a contact. Removing an absent row is not an error.
    async fn remove(&self, contact: &Contact) -> Result<(), ContactPersistenceError>;
}
