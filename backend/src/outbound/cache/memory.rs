//! Process-local category list cache.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::Category;
use crate::domain::ports::{CategoryCache, CategoryCacheError, CategoryCacheKey};

/// [`CategoryCache`] backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct InMemoryCategoryCache {
    entries: Mutex<HashMap<String, Vec<Category>>>,
}

impl InMemoryCategoryCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<Category>>>, CategoryCacheError> {
        self.entries
            .lock()
            .map_err(|_| CategoryCacheError::backend("in-memory cache lock poisoned"))
    }
}

#[async_trait]
impl CategoryCache for InMemoryCategoryCache {
    async fn get(&self, key: &CategoryCacheKey) -> Result<Option<Vec<Category>>, CategoryCacheError> {
        Ok(self.entries()?.get(key.as_str()).cloned())
    }

    async fn set(
        &self,
        key: &CategoryCacheKey,
        categories: &[Category],
    ) -> Result<(), CategoryCacheError> {
        self.entries()?
            .insert(key.as_str().to_owned(), categories.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &CategoryCacheKey) -> Result<(), CategoryCacheError> {
        self.entries()?.remove(key.as_str());
        Ok(())
    }

    async fn is_hit(&self, key: &CategoryCacheKey) -> Result<bool, CategoryCacheError> {
        Ok(self.entries()?.contains_key(key.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::test_support::{category_for, member};

    #[fixture]
    fn cache() -> InMemoryCategoryCache {
        InMemoryCategoryCache::new()
    }

    #[rstest]
    #[tokio::test]
    async fn cold_key_misses(cache: InMemoryCategoryCache) {
        let key = CategoryCacheKey::global();
        assert!(!cache.is_hit(&key).await.expect("is_hit"));
        assert!(cache.get(&key).await.expect("get").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn set_then_delete(cache: InMemoryCategoryCache) {
        let key = CategoryCacheKey::global();
        let list = vec![category_for(&member("alice"), "Family")];

        cache.set(&key, &list).await.expect("set");
        assert!(cache.is_hit(&key).await.expect("is_hit"));
        assert_eq!(cache.get(&key).await.expect("get"), Some(list));

        cache.delete(&key).await.expect("delete");
        assert!(!cache.is_hit(&key).await.expect("is_hit"));
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_cold_key_is_fine(cache: InMemoryCategoryCache) {
        cache
            .delete(&CategoryCacheKey::global())
            .await
            .expect("delete cold key");
    }
}
