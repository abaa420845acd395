//! Driving ports for the category workflow.
//!
//! Every operation checks `ROLE_USER` on the acting user before anything
//! else and fails with [`Error::forbidden`] when it is missing.

use async_trait::async_trait;

use crate::domain::{
    Category, CategoryForm, CategoryId, CsrfVerdict, DeleteOutcome, Error, Submission, User,
};

/// Read side of the category workflow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryQuery: Send + Sync {
    /// Categories listed for `user`, served through the category cache.
    async fn list(&self, user: &User) -> Result<Vec<Category>, Error>;

    /// Resolve a route id to one of `user`'s categories.
    ///
    /// Fails with [`Error::not_found`] when the id is unknown or owned by
    /// someone else.
    async fn resolve(&self, user: &User, id: &CategoryId) -> Result<Category, Error>;
}

/// Write side of the category workflow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryCommand: Send + Sync {
    /// Validate `form` and store a new category owned by `user`.
    async fn create(&self, user: &User, form: &CategoryForm)
    -> Result<Submission<Category>, Error>;

    /// Validate `form` and rename `category`.
    async fn edit(
        &self,
        user: &User,
        category: Category,
        form: &CategoryForm,
    ) -> Result<Submission<Category>, Error>;

    /// Remove `category` when `verdict` is valid; otherwise do nothing.
    async fn delete(
        &self,
        user: &User,
        category: &Category,
        verdict: CsrfVerdict,
    ) -> Result<DeleteOutcome, Error>;
}
