//! Category workflow service.
//!
//! Implements the category driving ports over a [`CategoryRepository`] and a
//! [`CategoryCache`]. Listing reads through the cache; every write deletes
//! the cache key before committing to the repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    CategoryCache, CategoryCacheError, CategoryCacheKey, CategoryCacheScope, CategoryCommand,
    CategoryPersistenceError, CategoryQuery, CategoryRepository,
};
use crate::domain::{
    Category, CategoryForm, CategoryId, CsrfVerdict, DeleteOutcome, Error, Role, Submission,
    User, Validate, deny_access_unless_granted,
};

/// Category service implementing [`CategoryQuery`] and [`CategoryCommand`].
#[derive(Clone)]
pub struct CategoryService<R, C> {
    repository: Arc<R>,
    cache: Arc<C>,
    scope: CategoryCacheScope,
}

impl<R, C> CategoryService<R, C> {
    /// Create a service keyed by the shared `"categories"` cache entry.
    #[must_use]
    pub fn new(repository: Arc<R>, cache: Arc<C>) -> Self {
        Self::with_scope(repository, cache, CategoryCacheScope::Global)
    }

    /// Create a service using an explicit cache scope.
    #[must_use]
    pub fn with_scope(repository: Arc<R>, cache: Arc<C>, scope: CategoryCacheScope) -> Self {
        Self {
            repository,
            cache,
            scope,
        }
    }
}

impl<R, C> CategoryService<R, C>
where
    R: CategoryRepository,
    C: CategoryCache,
{
    fn map_repository_error(error: CategoryPersistenceError) -> Error {
        match error {
            CategoryPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("category repository unavailable: {message}"))
            }
            CategoryPersistenceError::Query { message } => {
                Error::internal(format!("category repository error: {message}"))
            }
        }
    }

    fn map_cache_error(error: CategoryCacheError) -> Error {
        match error {
            CategoryCacheError::Backend { message } => {
                Error::service_unavailable(format!("category cache unavailable: {message}"))
            }
            CategoryCacheError::Serialization { message } => {
                Error::internal(format!("category cache error: {message}"))
            }
        }
    }

    fn key_for(&self, user: &User) -> CategoryCacheKey {
        self.scope.key_for(user.id())
    }

    async fn query(&self, user: &User) -> Result<Vec<Category>, Error> {
        self.repository
            .list_by_owner(user.id())
            .await
            .map_err(Self::map_repository_error)
    }

    async fn invalidate(&self, key: &CategoryCacheKey) -> Result<(), Error> {
        self.cache.delete(key).await.map_err(Self::map_cache_error)
    }

    fn ensure_owned(user: &User, category: &Category) -> Result<(), Error> {
        if category.owner() == user.id() {
            Ok(())
        } else {
            Err(Error::not_found("category not found"))
        }
    }
}

#[async_trait]
impl<R, C> CategoryQuery for CategoryService<R, C>
where
    R: CategoryRepository,
    C: CategoryCache,
{
    async fn list(&self, user: &User) -> Result<Vec<Category>, Error> {
        deny_access_unless_granted(user, Role::USER)?;
        let key = self.key_for(user);

        let hit = self
            .cache
            .is_hit(&key)
            .await
            .map_err(Self::map_cache_error)?;
        let fresh = if hit {
            None
        } else {
            let categories = self.query(user).await?;
            self.cache
                .set(&key, &categories)
                .await
                .map_err(Self::map_cache_error)?;
            Some(categories)
        };

        match self.cache.get(&key).await.map_err(Self::map_cache_error)? {
            Some(cached) => Ok(cached),
            None => {
                warn!(key = %key, "category cache read-back missed; serving repository result");
                match fresh {
                    Some(categories) => Ok(categories),
                    None => self.query(user).await,
                }
            }
        }
    }

    async fn resolve(&self, user: &User, id: &CategoryId) -> Result<Category, Error> {
        deny_access_unless_granted(user, Role::USER)?;
        self.repository
            .find_by_id(user.id(), id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found("category not found"))
    }
}

#[async_trait]
impl<R, C> CategoryCommand for CategoryService<R, C>
where
    R: CategoryRepository,
    C: CategoryCache,
{
    async fn create(
        &self,
        user: &User,
        form: &CategoryForm,
    ) -> Result<Submission<Category>, Error> {
        deny_access_unless_granted(user, Role::USER)?;
        let name = match form.validate() {
            Ok(name) => name,
            Err(errors) => return Ok(Submission::Rejected(errors)),
        };

        self.invalidate(&self.key_for(user)).await?;
        let category = Category::new(*user.id(), name);
        self.repository
            .insert(&category)
            .await
            .map_err(Self::map_repository_error)?;
        info!(category_id = %category.id(), owner = %user.id(), "category created");
        Ok(Submission::Accepted(category))
    }

    async fn edit(
        &self,
        user: &User,
        mut category: Category,
        form: &CategoryForm,
    ) -> Result<Submission<Category>, Error> {
        deny_access_unless_granted(user, Role::USER)?;
        Self::ensure_owned(user, &category)?;
        let name = match form.validate() {
            Ok(name) => name,
            Err(errors) => return Ok(Submission::Rejected(errors)),
        };

        self.invalidate(&self.key_for(user)).await?;
        category.rename(name);
        self.repository
            .update(&category)
            .await
            .map_err(Self::map_repository_error)?;
        info!(category_id = %category.id(), owner = %user.id(), "category updated");
        Ok(Submission::Accepted(category))
    }

    async fn delete(
        &self,
        user: &User,
        category: &Category,
        verdict: CsrfVerdict,
    ) -> Result<DeleteOutcome, Error> {
        deny_access_unless_granted(user, Role::USER)?;
        Self::ensure_owned(user, category)?;
        if !verdict.is_valid() {
            warn!(category_id = %category.id(), "category delete skipped: invalid CSRF token");
            return Ok(DeleteOutcome::Skipped);
        }

        self.invalidate(&self.key_for(user)).await?;
        self.repository
            .remove(category)
            .await
            .map_err(Self::map_repository_error)?;
        info!(category_id = %category.id(), owner = %user.id(), "category deleted");
        Ok(DeleteOutcome::Removed)
    }
}

#[cfg(test)]
#[path = "category_service_tests.rs"]
mod tests;
