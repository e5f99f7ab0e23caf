//! Command port for post persistence: create, update, delete.
//!
//! The admin controller delegates writes here rather than talking to the ORM
//! directly; the Diesel adapter implements this port alongside the query
//! port.

use async_trait::async_trait;

use crate::domain::{Post, PostDraft, PostId};

/// Errors raised by post command adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostCommandError {
    /// Backing store could not be reached.
    #[error("post store connection failed: {message}")]
    Connection {
        /// Adapter-provided description of the failure.
        message: String,
    },
    /// Statement failed during execution.
    #[error("post store statement failed: {message}")]
    Query {
        /// Adapter-provided description of the failure.
        message: String,
    },
    /// The targeted post no longer exists.
    #[error("post {id} does not exist")]
    NotFound {
        /// Identifier of the missing post.
        id: PostId,
    },
}

impl PostCommandError {
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

    /// Create a not-found error for `id`.
    pub fn not_found(id: PostId) -> Self {
        Self::NotFound { id }
    }
}

/// Port for writing posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostCommand: Send + Sync {
    /// Persist a new post from a validated draft and return it.
    async fn create(&self, draft: PostDraft) -> Result<Post, PostCommandError>;

    /// Replace the mutable fields of post `id` from a validated draft and
    /// return the updated post.
    async fn update(&self, id: &PostId, draft: PostDraft) -> Result<Post, PostCommandError>;

    /// Delete post `id`, clearing its tag associations.
    async fn delete(&self, id: &PostId) -> Result<(), PostCommandError>;
}

/// Fixture implementation for tests that do not exercise writes.
///
/// `create` and `update` materialize the draft in place with the current
/// time, so handler tests observe realistic payloads without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePostCommand;

#[async_trait]
impl PostCommand for FixturePostCommand {
    async fn create(&self, draft: PostDraft) -> Result<Post, PostCommandError> {
        Ok(draft.into_post(PostId::random(), chrono::Utc::now()))
    }

    async fn update(&self, id: &PostId, draft: PostDraft) -> Result<Post, PostCommandError> {
        Ok(draft.into_post(*id, chrono::Utc::now()))
    }

    async fn delete(&self, _id: &PostId) -> Result<(), PostCommandError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::UserId;
    use rstest::rstest;

    fn draft() -> PostDraft {
        PostDraft::new("A Title", "summary", "content", UserId::random(), vec![])
            .expect("valid draft")
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_create_materializes_the_draft() {
        let created = FixturePostCommand
            .create(draft())
            .await
            .expect("fixture create succeeds");
        assert_eq!(created.slug, "a-title");
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_update_keeps_the_id() {
        let id = PostId::random();
        let updated = FixturePostCommand
            .update(&id, draft())
            .await
            .expect("fixture update succeeds");
        assert_eq!(updated.id, id);
    }

    #[rstest]
    fn not_found_names_the_id() {
        let id = PostId::random();
        let err = PostCommandError::not_found(id);
        assert!(err.to_string().contains(&id.to_string()));
    }
}
