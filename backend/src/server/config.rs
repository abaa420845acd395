//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use carnet::domain::ports::CategoryCacheScope;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) database_url: Option<String>,
    pub(crate) redis_url: Option<String>,
    pub(crate) cache_scope: CategoryCacheScope,
}

impl ServerConfig {
    /// Construct a configuration backed by in-memory adapters.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            database_url: None,
            redis_url: None,
            cache_scope: CategoryCacheScope::default(),
        }
    }

    /// Use the Diesel repositories against `database_url`.
    #[must_use]
    pub fn with_database_url(mut self, database_url: Option<String>) -> Self {
        self.database_url = database_url;
        self
    }

    /// Use the Redis category cache at `redis_url`.
    #[must_use]
    pub fn with_redis_url(mut self, redis_url: Option<String>) -> Self {
        self.redis_url = redis_url;
        self
    }

    #[must_use]
    pub fn with_cache_scope(mut self, cache_scope: CategoryCacheScope) -> Self {
        self.cache_scope = cache_scope;
        self
    }
}
