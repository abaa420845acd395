//! Login and session-user resolution over the user repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::admin_bootstrap::{map_password_hash_error, map_user_persistence_error};
use crate::domain::ports::{CurrentUserQuery, LoginService, PasswordHasher, UserRepository};
use crate::domain::{Error, LoginCredentials, User, UserId};

/// Account service implementing [`LoginService`] and [`CurrentUserQuery`].
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> AccountService<U, H> {
    /// Service over the given user store and hasher.
    #[must_use]
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<U, H> LoginService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let Some(user) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_persistence_error)?
        else {
            debug!(username = credentials.username(), "login for unknown username");
            return Err(Error::unauthorized("invalid credentials"));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash().as_str())
            .map_err(map_password_hash_error)?;
        if !matches {
            debug!(user_id = %user.id(), "login with wrong password");
            return Err(Error::unauthorized("invalid credentials"));
        }

        info!(user_id = %user.id(), "user logged in");
        Ok(*user.id())
    }
}

#[async_trait]
impl<U, H> CurrentUserQuery for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn current_user(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_persistence_error)
    }
}
