//! Port interface for the category list cache.
use async_trait::async_trait;

use crate::domain::Category;

use super::{CategoryCacheKey, define_port_error};

define_port_error! {
    /// Errors surfaced by category cache adapters.
    pub enum CategoryCacheError {
        /// Cache backend is unavailable or timing out.
        Backend { message: String } => "category cache backend failure: {message}",
        /// Serialisation or deserialisation of cached content failed.
        Serialization { message: String } => "category cache serialisation failed: {message}",
    }
}

/// Single-key store holding a serialised category list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryCache: Send + Sync {
    /// Read the cached list, `None` when the key is cold.
    async fn get(&self, key: &CategoryCacheKey) -> Result<Option<Vec<Category>>, CategoryCacheError>;

    /// Store `categories` under `key`, replacing any previous value.
    async fn set(
        &self,
        key: &CategoryCacheKey,
        categories: &[Category],
    ) -> Result<(), CategoryCacheError>;

    /// Drop `key`. Deleting a cold key is not an error.
    async fn delete(&self, key: &CategoryCacheKey) -> Result<(), CategoryCacheError>;

    /// Whether `key` currently holds a value.
    async fn is_hit(&self, key: &CategoryCacheKey) -> Result<bool, CategoryCacheError>;
}
