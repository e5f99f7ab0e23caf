//! Redis-backed cache member of the repository chain.
//!
//! Posts are stored as JSON under namespaced keys (`post:v1:<uuid>`) so a
//! payload-shape change can bump the namespace instead of flushing the
//! instance. Only id lookups are served from the cache; criteria queries
//! always report "nothing here" so a chain falls through to the persistent
//! member. The adapter never populates the cache on a miss.

use async_trait::async_trait;
use bb8_redis::redis::AsyncCommands;
use tracing::debug;

use crate::domain::ports::{PostQuery, PostRepository, PostRepositoryError};
use crate::domain::{Post, PostId};

use super::pool::{CachePool, CachePoolError};

/// Key namespace; bump the version segment when the payload shape changes.
const KEY_PREFIX: &str = "post:v1";

/// Cache-backed implementation of the `PostRepository` port.
#[derive(Clone)]
pub struct RedisPostRepository {
    pool: CachePool,
}

impl RedisPostRepository {
    /// Create a new adapter over the given cache pool.
    pub fn new(pool: CachePool) -> Self {
        Self { pool }
    }

    fn key_for(id: &PostId) -> String {
        format!("{KEY_PREFIX}:{id}")
    }
}

fn map_pool_error(error: CachePoolError) -> PostRepositoryError {
    match error {
        CachePoolError::Checkout { message } | CachePoolError::Build { message } => {
            PostRepositoryError::connection(message)
        }
    }
}

fn map_redis_error(error: &bb8_redis::redis::RedisError) -> PostRepositoryError {
    debug!(error = %error, "redis operation failed");
    if error.is_connection_refusal() || error.is_timeout() || error.is_connection_dropped() {
        PostRepositoryError::connection("cache connection error")
    } else {
        PostRepositoryError::query("cache query error")
    }
}

fn decode_post(raw: &str) -> Result<Post, PostRepositoryError> {
    serde_json::from_str(raw).map_err(|err| {
        debug!(error = %err, "cached post payload undecodable");
        PostRepositoryError::serialization("cached post payload undecodable")
    })
}

#[async_trait]
impl PostRepository for RedisPostRepository {
    /// Look the post up by key; an absent key is a miss, never an error.
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let raw: Option<String> = conn
            .get(Self::key_for(id))
            .await
            .map_err(|err| map_redis_error(&err))?;

        match raw {
            Some(payload) => Ok(Some(decode_post(&payload)?)),
            None => Ok(None),
        }
    }

    /// Criteria queries are not served from the cache; report an empty
    /// result so a chain falls through to the persistent member.
    async fn find_by(&self, _query: &PostQuery) -> Result<Vec<Post>, PostRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    use crate::domain::UserId;

    fn sample_post(id: PostId) -> Post {
        Post {
            id,
            title: "A Title".to_owned(),
            slug: "a-title".to_owned(),
            summary: "s".to_owned(),
            content: "c".to_owned(),
            author_id: UserId::random(),
            tags: vec!["rust".to_owned()],
            published_at: Utc::now(),
        }
    }

    #[rstest]
    fn keys_are_namespaced_and_versioned() {
        let id = PostId::random();
        let key = RedisPostRepository::key_for(&id);
        assert_eq!(key, format!("post:v1:{id}"));
    }

    #[rstest]
    fn payloads_round_trip_through_json() {
        let post = sample_post(PostId::random());
        let payload = serde_json::to_string(&post).expect("post serializes");
        let decoded = decode_post(&payload).expect("payload decodes");
        assert_eq!(decoded, post);
    }

    #[rstest]
    fn undecodable_payloads_are_serialization_errors() {
        let err = decode_post("{not json").expect_err("broken payload must fail");
        assert!(matches!(err, PostRepositoryError::Serialization { .. }));
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(CachePoolError::checkout("timed out"));
        assert!(matches!(err, PostRepositoryError::Connection { .. }));
    }
}
