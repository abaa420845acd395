//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CategoryCommand, CategoryQuery, ContactCommand, ContactQuery, CurrentUserQuery, LoginService,
};

/// Parameter object bundling every port implementation used by handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Credential check for `POST /login`.
    pub login: Arc<dyn LoginService>,
    /// Session user lookup.
    pub current_user: Arc<dyn CurrentUserQuery>,
    /// Category reads.
    pub categories: Arc<dyn CategoryQuery>,
    /// Category writes.
    pub category_commands: Arc<dyn CategoryCommand>,
    /// Contact reads.
    pub contacts: Arc<dyn ContactQuery>,
    /// Contact writes.
    pub contact_commands: Arc<dyn ContactCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential check for `POST /login`.
    pub login: Arc<dyn LoginService>,
    /// Session user lookup.
    pub current_user: Arc<dyn CurrentUserQuery>,
    /// Category reads.
    pub categories: Arc<dyn CategoryQuery>,
    /// Category writes.
    pub category_commands: Arc<dyn CategoryCommand>,
    /// Contact reads.
    pub contacts: Arc<dyn ContactQuery>,
    /// Contact writes.
    pub contact_commands: Arc<dyn ContactCommand>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a port bundle.
    #[must_use]
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            current_user,
            categories,
            category_commands,
            contacts,
            contact_commands,
        } = ports;
        Self {
            login,
            current_user,
            categories,
            category_commands,
            contacts,
            contact_commands,
        }
    }

    /// Build state from services implementing both halves of each workflow.
    ///
    /// Used when the query and command ports are served by one object, as
    /// with [`crate::domain::CategoryService`].
    #[must_use]
    pub fn from_services<A, C, K>(accounts: Arc<A>, categories: Arc<C>, contacts: Arc<K>) -> Self
    where
        A: LoginService + CurrentUserQuery + 'static,
        C: CategoryQuery + CategoryCommand + 'static,
        K: ContactQuery + ContactCommand + 'static,
    {
        Self::new(HttpStatePorts {
            login: accounts.clone(),
            current_user: accounts,
            categories: categories.clone(),
            category_commands: categories,
            contacts: contacts.clone(),
            contact_commands: contacts,
        })
    }
}
