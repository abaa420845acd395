//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, cache, password hasher) are implemented by
//! `crate::outbound`; driving ports (workflows, login) are implemented by the
//! domain services and consumed by `crate::inbound`.

mod macros;
pub(crate) use macros::define_port_error;

mod cache_key;
mod category_cache;
mod category_repository;
mod category_workflow;
mod contact_repository;
mod contact_workflow;
mod login_service;
mod password_hasher;
mod user_repository;

pub use cache_key::{
    CategoryCacheKey, CategoryCacheScope, CategoryCacheScopeParseError,
    GLOBAL_CATEGORY_CACHE_KEY,
};
#[cfg(test)]
pub use category_cache::MockCategoryCache;
pub use category_cache::{CategoryCache, CategoryCacheError};
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{CategoryPersistenceError, CategoryRepository};
#[cfg(test)]
pub use category_workflow::{MockCategoryCommand, MockCategoryQuery};
pub use category_workflow::{CategoryCommand, CategoryQuery};
#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::{ContactPersistenceError, ContactRepository};
#[cfg(test)]
pub use contact_workflow::{MockContactCommand, MockContactQuery};
pub use contact_workflow::{ContactCommand, ContactFormHandler, ContactQuery};
#[cfg(test)]
pub use login_service::{MockCurrentUserQuery, MockLoginService};
pub use login_service::{CurrentUserQuery, LoginService};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
