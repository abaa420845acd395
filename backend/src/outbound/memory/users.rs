//! In-memory user accounts keyed by id, with the username index enforced
//! on insert.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

use super::lock;

/// [`UserRepository`] keeping accounts in memory. Usernames are unique.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut rows = lock(&self.rows, UserPersistenceError::query)?;
        if rows.iter().any(|row| row.username() == user.username()) {
            return Err(UserPersistenceError::duplicate("users_username_key"));
        }
        rows.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let rows = lock(&self.rows, UserPersistenceError::query)?;
        Ok(rows.iter().find(|row| row.id() == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError> {
        let rows = lock(&self.rows, UserPersistenceError::query)?;
        Ok(rows
            .iter()
            .find(|row| row.username().as_str() == username)
            .cloned())
    }
}
