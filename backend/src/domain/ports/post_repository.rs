//! Query port for post lookups, hiding the backing store.
//!
//! Adapters exist for Redis (cache) and PostgreSQL (persistent); the chain
//! composite holds several of them in precedence order. Callers never learn
//! which member answered: a miss is `Ok(None)` or an empty vec, never an
//! error.

use async_trait::async_trait;

use crate::domain::{Post, PostId, UserId};

/// Errors raised by post repository adapters.
///
/// Misses are not errors. These variants cover genuine faults only, so a
/// caller can always distinguish "not found" from "could not look".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostRepositoryError {
    /// Backing store could not be reached.
    #[error("post repository connection failed: {message}")]
    Connection {
        /// Adapter-provided description of the failure.
        message: String,
    },
    /// Query failed during execution.
    #[error("post repository query failed: {message}")]
    Query {
        /// Adapter-provided description of the failure.
        message: String,
    },
    /// A stored payload could not be decoded.
    #[error("post repository payload undecodable: {message}")]
    Serialization {
        /// Adapter-provided description of the failure.
        message: String,
    },
}

impl PostRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a serialization error with the given message.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

/// Field a post listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostField {
    /// Publication timestamp.
    PublishedAt,
    /// Post title, lexicographic.
    Title,
}

/// Ordering direction for [`PostQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    Desc,
}

/// Criteria and ordering for [`PostRepository::find_by`].
///
/// The default query matches every post, newest first — the admin listing's
/// ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct PostQuery {
    /// Restrict to posts by this author.
    pub author: Option<UserId>,
    /// Restrict to posts carrying this slug.
    pub slug: Option<String>,
    /// Field the results are ordered by.
    pub order_by: PostField,
    /// Direction of the ordering.
    pub direction: SortDirection,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            author: None,
            slug: None,
            order_by: PostField::PublishedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl PostQuery {
    /// Query for every post by `author`, newest first.
    pub fn authored_by(author: UserId) -> Self {
        Self {
            author: Some(author),
            ..Self::default()
        }
    }

    /// Query for the post carrying `slug`.
    pub fn with_slug(slug: impl Into<String>) -> Self {
        Self {
            slug: Some(slug.into()),
            ..Self::default()
        }
    }

    /// Replace the ordering.
    #[must_use]
    pub fn ordered_by(mut self, field: PostField, direction: SortDirection) -> Self {
        self.order_by = field;
        self.direction = direction;
        self
    }
}

/// Port for looking up posts by id or criteria.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post by identifier. `Ok(None)` means the store holds no such
    /// post; errors are reserved for faults.
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostRepositoryError>;

    /// Find posts matching `query`, ordered per its ordering. An empty vec
    /// means nothing matched.
    async fn find_by(&self, query: &PostQuery) -> Result<Vec<Post>, PostRepositoryError>;
}

/// Fixture implementation for tests that do not exercise lookups.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePostRepository;

#[async_trait]
impl PostRepository for FixturePostRepository {
    async fn find_by_id(&self, _id: &PostId) -> Result<Option<Post>, PostRepositoryError> {
        Ok(None)
    }

    async fn find_by(&self, _query: &PostQuery) -> Result<Vec<Post>, PostRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_always_misses() {
        let repo = FixturePostRepository;
        let found = repo
            .find_by_id(&PostId::random())
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());

        let listed = repo
            .find_by(&PostQuery::default())
            .await
            .expect("fixture listing succeeds");
        assert!(listed.is_empty());
    }

    #[rstest]
    fn default_query_is_newest_first() {
        let query = PostQuery::default();
        assert_eq!(query.order_by, PostField::PublishedAt);
        assert_eq!(query.direction, SortDirection::Desc);
        assert!(query.author.is_none());
        assert!(query.slug.is_none());
    }

    #[rstest]
    fn authored_by_keeps_the_default_ordering() {
        let author = UserId::random();
        let query = PostQuery::authored_by(author);
        assert_eq!(query.author, Some(author));
        assert_eq!(query.direction, SortDirection::Desc);
    }

    #[rstest]
    fn with_slug_sets_only_the_slug_criterion() {
        let query = PostQuery::with_slug("hello-world");
        assert_eq!(query.slug.as_deref(), Some("hello-world"));
        assert!(query.author.is_none());
        assert_eq!(query.order_by, PostField::PublishedAt);
    }

    #[rstest]
    fn ordered_by_replaces_field_and_direction() {
        let query = PostQuery::default().ordered_by(PostField::Title, SortDirection::Asc);
        assert_eq!(query.order_by, PostField::Title);
        assert_eq!(query.direction, SortDirection::Asc);
    }

    #[rstest]
    fn error_constructors_format_messages() {
        let err = PostRepositoryError::serialization("bad payload");
        assert!(err.to_string().contains("bad payload"));
        assert!(matches!(err, PostRepositoryError::Serialization { .. }));
    }
}
