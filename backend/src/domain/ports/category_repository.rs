//! Port abstraction for category persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Category, CategoryId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by category repository adapters.
    pub enum CategoryPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "category repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "category repository query failed: {message}",
    }
}

/// Category storage. Every mutating call is committed before it returns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Categories owned by `owner`, oldest first.
    async fn list_by_owner(&self, owner: &UserId)
    -> Result<Vec<Category>, CategoryPersistenceError>;

    /// Category `id` when it exists and belongs to `owner`.
    async fn find_by_id(
        &self,
        owner: &UserId,
        id: &CategoryId,
    ) -> Result<Option<Category>, CategoryPersistenceError>;

    /// Store a new category.
    async fn insert(&self, category: &Category) -> Result<(), CategoryPersistenceError>;

    /// Overwrite the name of an existing category.
    async fn update(&self, category: &Category) -> Result<(), CategoryPersistenceError>;

    /// Remove a category. Removing an absent row is not an error.
    async fn remove(&self, category: &Category) -> Result<(), CategoryPersistenceError>;
}
