//! Builders wiring repositories, cache and hasher into the HTTP state.
//!
//! A configured database URL selects the Diesel repositories (after applying
//! pending migrations); otherwise records live in memory. The category cache
//! follows the same rule for the Redis URL.

use std::sync::Arc;

use tracing::{info, warn};

use carnet::domain::ports::{
    CategoryCache, CategoryCacheScope, CategoryRepository, ContactRepository, PasswordHasher,
    UserRepository,
};
use carnet::domain::{AccountService, CategoryService, ContactService};
use carnet::inbound::http::state::HttpState;
use carnet::outbound::cache::{InMemoryCategoryCache, RedisCategoryCache};
use carnet::outbound::memory::{
    InMemoryCategoryRepository, InMemoryContactRepository, InMemoryUserRepository,
};
use carnet::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselContactRepository, DieselUserRepository, PoolConfig,
    run_pending_migrations,
};
use carnet::outbound::security::Argon2PasswordHasher;

use super::ServerConfig;

struct Repositories<U, C, K> {
    users: Arc<U>,
    categories: Arc<C>,
    contacts: Arc<K>,
}

fn startup_error(context: &str, error: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {error}"))
}

/// Build the HTTP state for `config`.
///
/// # Errors
/// Returns [`std::io::Error`] when migrations fail or a configured backend
/// cannot be reached.
pub(super) async fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let hasher = Arc::new(Argon2PasswordHasher::new());
    match config.database_url.as_deref() {
        Some(url) => {
            run_pending_migrations(url)
                .await
                .map_err(|err| startup_error("database migrations failed", err))?;
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(|err| startup_error("database pool failed", err))?;
            info!("using PostgreSQL repositories");
            let repositories = Repositories {
                users: Arc::new(DieselUserRepository::new(pool.clone())),
                categories: Arc::new(DieselCategoryRepository::new(pool.clone())),
                contacts: Arc::new(DieselContactRepository::new(pool)),
            };
            with_cache(repositories, hasher, config).await
        }
        None => {
            warn!("no database URL configured; records are kept in memory");
            let repositories = Repositories {
                users: Arc::new(InMemoryUserRepository::new()),
                categories: Arc::new(InMemoryCategoryRepository::new()),
                contacts: Arc::new(InMemoryContactRepository::new()),
            };
            with_cache(repositories, hasher, config).await
        }
    }
}

async fn with_cache<U, C, K, H>(
    repositories: Repositories<U, C, K>,
    hasher: Arc<H>,
    config: &ServerConfig,
) -> std::io::Result<HttpState>
where
    U: UserRepository + 'static,
    C: CategoryRepository + 'static,
    K: ContactRepository + 'static,
    H: PasswordHasher + 'static,
{
    match config.redis_url.as_deref() {
        Some(url) => {
            let cache = RedisCategoryCache::connect(url)
                .await
                .map_err(|err| startup_error("redis cache failed", err))?;
            info!("using Redis category cache");
            Ok(assemble(
                repositories,
                hasher,
                Arc::new(cache),
                config.cache_scope,
            ))
        }
        None => Ok(assemble(
            repositories,
            hasher,
            Arc::new(InMemoryCategoryCache::new()),
            config.cache_scope,
        )),
    }
}

fn assemble<U, C, K, H, Cache>(
    repositories: Repositories<U, C, K>,
    hasher: Arc<H>,
    cache: Arc<Cache>,
    scope: CategoryCacheScope,
) -> HttpState
where
    U: UserRepository + 'static,
    C: CategoryRepository + 'static,
    K: ContactRepository + 'static,
    H: PasswordHasher + 'static,
    Cache: CategoryCache + 'static,
{
    let Repositories {
        users,
        categories,
        contacts,
    } = repositories;
    HttpState::from_services(
        Arc::new(AccountService::new(users, hasher)),
        Arc::new(CategoryService::with_scope(categories, cache, scope)),
        Arc::new(ContactService::new(contacts)),
    )
}
