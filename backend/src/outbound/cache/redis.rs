//! Redis-backed category list cache.
//!
//! Lists are stored as JSON strings without expiry; writes invalidate the
//! key explicitly.

use async_trait::async_trait;
use bb8_redis::bb8::Pool;
use bb8_redis::redis::AsyncCommands;
use bb8_redis::{RedisConnectionManager, redis::RedisError};
use tracing::debug;

use crate::domain::Category;
use crate::domain::ports::{CategoryCache, CategoryCacheError, CategoryCacheKey};

/// Errors raised while building the Redis pool.
#[derive(Debug, thiserror::Error)]
pub enum RedisCacheError {
    /// The Redis URL could not be parsed.
    #[error("invalid redis url: {0}")]
    Url(#[source] RedisError),
    /// The initial pool connection failed.
    #[error("failed to build redis pool: {0}")]
    Pool(#[source] RedisError),
}

/// [`CategoryCache`] backed by Redis.
#[derive(Clone)]
pub struct RedisCategoryCache {
    pool: Pool<RedisConnectionManager>,
}

impl RedisCategoryCache {
    /// Connect to `redis_url` and build a connection pool.
    pub async fn connect(redis_url: &str) -> Result<Self, RedisCacheError> {
        let manager = RedisConnectionManager::new(redis_url).map_err(RedisCacheError::Url)?;
        let pool = Pool::builder()
            .build(manager)
            .await
            .map_err(RedisCacheError::Pool)?;
        Ok(Self { pool })
    }

    async fn connection(
        &self,
    ) -> Result<bb8_redis::bb8::PooledConnection<'_, RedisConnectionManager>, CategoryCacheError>
    {
        self.pool
            .get()
            .await
            .map_err(|err| CategoryCacheError::backend(err.to_string()))
    }
}

fn map_redis_error(error: RedisError) -> CategoryCacheError {
    debug!(error = %error, "redis command failed");
    CategoryCacheError::backend(error.to_string())
}

fn encode(categories: &[Category]) -> Result<String, CategoryCacheError> {
    serde_json::to_string(categories)
        .map_err(|err| CategoryCacheError::serialization(err.to_string()))
}

fn decode(raw: &str) -> Result<Vec<Category>, CategoryCacheError> {
    serde_json::from_str(raw).map_err(|err| CategoryCacheError::serialization(err.to_string()))
}

#[async_trait]
impl CategoryCache for RedisCategoryCache {
    async fn get(&self, key: &CategoryCacheKey) -> Result<Option<Vec<Category>>, CategoryCacheError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn.get(key.as_str()).await.map_err(map_redis_error)?;
        raw.as_deref().map(decode).transpose()
    }

    async fn set(
        &self,
        key: &CategoryCacheKey,
        categories: &[Category],
    ) -> Result<(), CategoryCacheError> {
        let payload = encode(categories)?;
        let mut conn = self.connection().await?;
        let (): () = conn
            .set(key.as_str(), payload)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }

    async fn delete(&self, key: &CategoryCacheKey) -> Result<(), CategoryCacheError> {
        let mut conn = self.connection().await?;
        let _removed: u64 = conn.del(key.as_str()).await.map_err(map_redis_error)?;
        Ok(())
    }

    async fn is_hit(&self, key: &CategoryCacheKey) -> Result<bool, CategoryCacheError> {
        let mut conn = self.connection().await?;
        conn.exists(key.as_str()).await.map_err(map_redis_error)
    }
}
