//! Category list cache adapters.
//!
//! - [`RedisCategoryCache`] stores the list as JSON in Redis via a `bb8`
//!   pool.
//! - [`InMemoryCategoryCache`] keeps it in process memory and is used when no
//!   Redis URL is configured, and in tests.

mod memory;
mod redis;

pub use memory::InMemoryCategoryCache;
pub use redis::{RedisCacheError, RedisCategoryCache};
