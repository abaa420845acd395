//! Administrative account bootstrap.
//!
//! Creates a privileged user from a username, password and email. The
//! password is hashed through the [`PasswordHasher`] port and the account is
//! validated before it is stored. There is no idempotence check; a taken
//! username surfaces as a conflict from the repository.

use std::sync::Arc;

use tracing::info;

use crate::domain::ports::{PasswordHashError, PasswordHasher, UserPersistenceError, UserRepository};
use crate::domain::{Error, Role, User, UserDraft, Validate};

/// Service creating administrator accounts.
pub struct AdminBootstrapService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> AdminBootstrapService<U, H> {
    /// Service over the given user store and hasher.
    #[must_use]
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[must_use]
pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { message } => {
            Error::conflict(format!("user already exists: {message}"))
        }
    }
}

#[must_use]
pub(crate) fn map_password_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

impl<U, H> AdminBootstrapService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// Hash `password`, build a `ROLE_ADMIN` account, validate it and store it.
    pub async fn create_admin(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<User, Error> {
        let encoded = self
            .hasher
            .hash(password)
            .map_err(map_password_hash_error)?;
        if encoded == password {
            return Err(Error::internal("password hasher returned the plain password"));
        }

        let draft = UserDraft {
            username: username.to_owned(),
            email: email.to_owned(),
            password_hash: encoded,
            roles: vec![Role::ADMIN.to_owned()],
        };
        let user = draft.validate()?;

        self.users
            .insert(&user)
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.id(), username = %user.username(), "admin account created");
        Ok(user)
    }
}
