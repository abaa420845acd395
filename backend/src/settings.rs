//! Server settings loaded via OrthoConfig.
//!
//! Values come from `CARNET_*` environment variables, configuration files
//! and command-line flags. Missing storage URLs select the in-memory
//! adapters.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::ports::{CategoryCacheScope, CategoryCacheScopeParseError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// `CARNET_BIND_ADDR` is not a socket address.
    #[error("invalid bind address `{value}`: {source}")]
    BindAddr {
        /// Offending value.
        value: String,
        /// Underlying parse error.
        #[source]
        source: std::net::AddrParseError,
    },
    /// `CARNET_CATEGORY_CACHE_SCOPE` names no known scope.
    #[error(transparent)]
    CacheScope(#[from] CategoryCacheScopeParseError),
}

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CARNET")]
pub struct ServerSettings {
    /// Socket address to bind, `0.0.0.0:8080` when unset.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL for the Diesel repositories.
    pub database_url: Option<String>,
    /// Redis connection URL for the category list cache.
    pub redis_url: Option<String>,
    /// `global` (default) or `per-owner`.
    pub category_cache_scope: Option<String>,
}

impl ServerSettings {
    /// Parsed bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Parsed category cache scope, global when unset.
    pub fn category_cache_scope(&self) -> Result<CategoryCacheScope, SettingsError> {
        match self.category_cache_scope.as_deref() {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(CategoryCacheScope::default()),
        }
    }
}
