//! In-memory categories kept in insertion order.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::ports::{CategoryPersistenceError, CategoryRepository};
use crate::domain::{Category, CategoryId, UserId};

use super::lock;

/// [`CategoryRepository`] keeping categories in memory.
#[derive(Debug, Default)]
pub struct InMemoryCategoryRepository {
    rows: Mutex<Vec<Category>>,
}

impl InMemoryCategoryRepository {
    /// Empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Category>, CategoryPersistenceError> {
        let rows = lock(&self.rows, CategoryPersistenceError::query)?;
        Ok(rows
            .iter()
            .filter(|row| row.owner() == owner)
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        owner: &UserId,
        id: &CategoryId,
    ) -> Result<Option<Category>, CategoryPersistenceError> {
        let rows = lock(&self.rows, CategoryPersistenceError::query)?;
        Ok(rows
            .iter()
            .find(|row| row.id() == *id && row.owner() == owner)
            .cloned())
    }

    async fn insert(&self, category: &Category) -> Result<(), CategoryPersistenceError> {
        lock(&self.rows, CategoryPersistenceError::query)?.push(category.clone());
        Ok(())
    }

    async fn update(&self, category: &Category) -> Result<(), CategoryPersistenceError> {
        let mut rows = lock(&self.rows, CategoryPersistenceError::query)?;
        let row = rows
            .iter_mut()
            .find(|row| row.id() == category.id() && row.owner() == category.owner())
            .ok_or_else(|| CategoryPersistenceError::query("category row vanished before update"))?;
        *row = category.clone();
        Ok(())
    }

    async fn remove(&self, category: &Category) -> Result<(), CategoryPersistenceError> {
        lock(&self.rows, CategoryPersistenceError::query)?
            .retain(|row| !(row.id() == category.id() && row.owner() == category.owner()));
        Ok(())
    }
}
