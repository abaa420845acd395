//! Driving ports for authentication and current-user resolution.
//!
//! Inbound adapters call these to authenticate credentials and to turn a
//! session user id back into an account, without importing persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User, UserId};

/// Authentication use-case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    ///
    /// Unknown usernames and wrong passwords both fail with
    /// [`Error::unauthorized`].
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Lookup of the account behind an authenticated session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurrentUserQuery: Send + Sync {
    /// Load the account for `id`, `None` when it no longer exists.
    async fn current_user(&self, id: &UserId) -> Result<Option<User>, Error>;
}
