//! Redis cache adapter for the post repository chain.

mod pool;
mod redis_post_repository;

pub use pool::{CachePool, CachePoolConfig, CachePoolError};
pub use redis_post_repository::RedisPostRepository;
