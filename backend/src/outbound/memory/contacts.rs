//! In-memory contacts kept in insertion order. Lookups and deletes are
//! scoped to the owning user.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::ports::{ContactPersistenceError, ContactRepository};
use crate::domain::{Contact, ContactId, UserId};

use super::lock;

/// [`ContactRepository`] keeping contacts in memory.
#[derive(Debug, Default)]
pub struct InMemoryContactRepository {
    rows: Mutex<Vec<Contact>>,
}

impl InMemoryContactRepository {
    /// Empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Contact>, ContactPersistenceError> {
        let rows = lock(&self.rows, ContactPersistenceError::query)?;
        Ok(rows
            .iter()
            .filter(|row| row.owner() == owner)
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        owner: &UserId,
        id: &ContactId,
    ) -> Result<Option<Contact>, ContactPersistenceError> {
        let rows = lock(&self.rows, ContactPersistenceError::query)?;
        Ok(rows
            .iter()
            .find(|row| row.id() == *id && row.owner() == owner)
            .cloned())
    }

    async fn insert(&self, contact: &Contact) -> Result<(), ContactPersistenceError> {
        lock(&self.rows, ContactPersistenceError::query)?.push(contact.clone());
        Ok(())
    }

    async fn update(&self, contact: &Contact) -> Result<(), ContactPersistenceError> {
        let mut rows = lock(&self.rows, ContactPersistenceError::query)?;
        let row = rows
            .iter_mut()
            .find(|row| row.id() == contact.id() && row.owner() == contact.owner())
            .ok_or_else(|| ContactPersistenceError::query("contact row vanished before update"))?;
        *row = contact.clone();
        Ok(())
    }

    async fn remove(&self, contact: &Contact) -> Result<(), ContactPersistenceError> {
        lock(&self.rows, ContactPersistenceError::query)?
            .retain(|row| !(row.id() == contact.id() && row.owner() == contact.owner()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContactDetails, Validate};
    use crate::test_support::{contact_for, contact_form, member};

    fn details() -> ContactDetails {
        contact_form("Eve", "Forger").validate().expect("valid")
    }

    #[tokio::test]
    async fn writes_are_owner_scoped() {
        let repository = InMemoryContactRepository::new();
        let alice = member("alice");
        let contact = contact_for(&alice, "Ada", "Lovelace");
        repository.insert(&contact).await.expect("insert");

        let forged = Contact::from_parts(
            contact.id(),
            *member("mallory").id(),
            details(),
            contact.created_at(),
        );
        repository.remove(&forged).await.expect("remove is a no-op");
        let err = repository.update(&forged).await.expect_err("foreign update");
        assert!(matches!(err, ContactPersistenceError::Query { .. }));

        let listed = repository.list_by_owner(alice.id()).await.expect("list");
        assert_eq!(listed, vec![contact]);
    }
}
