//! Async Redis connection pool for the cache adapter.
//!
//! Mirrors the database pool wrapper: `bb8` manages connection lifecycle and
//! checkout, and failures surface as typed [`CachePoolError`] variants.

use std::time::Duration;

use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::{Pool, PooledConnection};

/// Errors that can occur during cache pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CachePoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from cache pool: {message}")]
    Checkout {
        /// Underlying bb8/redis failure description.
        message: String,
    },

    /// Failed to build the connection pool.
    #[error("failed to build cache pool: {message}")]
    Build {
        /// Underlying bb8/redis failure description.
        message: String,
    },
}

impl CachePoolError {
    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Configuration for the Redis connection pool.
#[derive(Debug, Clone)]
pub struct CachePoolConfig {
    redis_url: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl CachePoolConfig {
    /// Create a new configuration with the given Redis URL.
    ///
    /// Defaults: 10 connections, 5 second checkout timeout. The cache sits
    /// in front of the database, so a slow checkout should fail fast rather
    /// than stall the chain.
    pub fn new(redis_url: impl Into<String>) -> Self {
        Self {
            redis_url: redis_url.into(),
            max_size: 10,
            connection_timeout: Duration::from_secs(5),
        }
    }

    /// Set the maximum number of connections in the pool.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the connection checkout timeout.
    #[must_use]
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Get the Redis URL.
    pub fn redis_url(&self) -> &str {
        &self.redis_url
    }
}

/// Shared async Redis pool handed to the cache adapter.
///
/// Cloning is cheap; clones share the underlying pool.
#[derive(Clone)]
pub struct CachePool {
    inner: Pool<RedisConnectionManager>,
}

impl CachePool {
    /// Create a new connection pool with the given configuration.
    ///
    /// # Errors
    /// Returns [`CachePoolError::Build`] when the URL is invalid or the pool
    /// cannot be constructed.
    pub async fn new(config: CachePoolConfig) -> Result<Self, CachePoolError> {
        let manager = RedisConnectionManager::new(config.redis_url.as_str())
            .map_err(|err| CachePoolError::build(err.to_string()))?;

        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| CachePoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Get a connection from the pool.
    ///
    /// # Errors
    /// Returns [`CachePoolError::Checkout`] when no connection becomes
    /// available within the configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, RedisConnectionManager>, CachePoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| CachePoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn config_defaults_favour_fast_failure() {
        let config = CachePoolConfig::new("redis://localhost:6379");

        assert_eq!(config.redis_url(), "redis://localhost:6379");
        assert_eq!(config.max_size, 10);
        assert_eq!(config.connection_timeout, Duration::from_secs(5));
    }

    #[rstest]
    fn config_builder_overrides() {
        let config = CachePoolConfig::new("redis://localhost:6379")
            .with_max_size(2)
            .with_connection_timeout(Duration::from_millis(500));

        assert_eq!(config.max_size, 2);
        assert_eq!(config.connection_timeout, Duration::from_millis(500));
    }

    #[rstest]
    fn errors_carry_their_messages() {
        let err = CachePoolError::checkout("no connection");
        assert!(err.to_string().contains("no connection"));
    }
}
