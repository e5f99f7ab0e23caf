//! Composite repository trying member strategies in fixed order.
//!
//! Member order is precedence order and is fixed once querying starts: the
//! first member to return a defined result wins, and later members are not
//! consulted. The chain never merges results across members and never
//! promotes a persistent hit back into a cache member.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{PostQuery, PostRepository, PostRepositoryError};
use crate::domain::{Post, PostId};

/// Ordered chain of `PostRepository` strategies, first hit wins.
///
/// A chain with no members reports every lookup as a miss.
#[derive(Clone, Default)]
pub struct ChainPostRepository {
    members: Vec<Arc<dyn PostRepository>>,
}

impl ChainPostRepository {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain from members in precedence order.
    pub fn of(members: impl IntoIterator<Item = Arc<dyn PostRepository>>) -> Self {
        Self {
            members: members.into_iter().collect(),
        }
    }

    /// Append a member with the lowest precedence so far.
    pub fn add(&mut self, repository: Arc<dyn PostRepository>) {
        self.members.push(repository);
    }

    /// Number of member strategies.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the chain has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[async_trait]
impl PostRepository for ChainPostRepository {
    /// Query members in order; the first `Some` wins. All-miss is a miss
    /// indistinguishable from a single repository's miss, and member faults
    /// propagate unchanged.
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostRepositoryError> {
        for member in &self.members {
            if let Some(post) = member.find_by_id(id).await? {
                return Ok(Some(post));
            }
        }
        Ok(None)
    }

    /// Query members in order; the first non-empty result wins. Results are
    /// never merged across members.
    async fn find_by(&self, query: &PostQuery) -> Result<Vec<Post>, PostRepositoryError> {
        for member in &self.members {
            let posts = member.find_by(query).await?;
            if !posts.is_empty() {
                return Ok(posts);
            }
        }
        Ok(Vec::new())
    }
}
