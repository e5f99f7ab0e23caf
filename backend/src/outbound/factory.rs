//! Repository-selection factory.
//!
//! Builds the concrete `PostRepository` strategy a deployment asked for:
//! cache only, persistent only, or the chained default that tries the cache
//! first and falls back to the database. Selection is an explicit enum
//! rather than anything keyed by type names, so configuration parses into
//! `RepositoryChoice` and unknown values fail up front.

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::ports::PostRepository;

use super::cache::{CachePool, RedisPostRepository};
use super::chain::ChainPostRepository;
use super::persistence::{DbPool, DieselPostRepository};

/// Which repository strategy to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RepositoryChoice {
    /// Cache-backed repository only.
    Cache,
    /// Database-backed repository only.
    Persistent,
    /// Cache first, persistent fallback. The default when configuration
    /// does not say otherwise.
    #[default]
    Chained,
}

impl RepositoryChoice {
    /// Configuration name of the choice.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Persistent => "persistent",
            Self::Chained => "chained",
        }
    }
}

impl std::fmt::Display for RepositoryChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when configuration names an unknown strategy.
///
/// An unknown value is a configuration mistake and fails fast; it does not
/// silently fall back to the default.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown repository strategy: {value} (expected cache, persistent, or chained)")]
pub struct RepositoryChoiceParseError {
    /// The rejected input.
    pub value: String,
}

impl FromStr for RepositoryChoice {
    type Err = RepositoryChoiceParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "cache" => Ok(Self::Cache),
            "persistent" => Ok(Self::Persistent),
            "chained" => Ok(Self::Chained),
            other => Err(RepositoryChoiceParseError {
                value: other.to_owned(),
            }),
        }
    }
}

/// Constructs post repositories over shared, externally owned pools.
///
/// The factory borrows the pools (clones share the underlying resources)
/// and has no side effects beyond object construction.
#[derive(Clone)]
pub struct PostRepositoryFactory {
    db_pool: DbPool,
    cache_pool: CachePool,
}

impl PostRepositoryFactory {
    /// Create a factory over the given pools.
    pub fn new(db_pool: DbPool, cache_pool: CachePool) -> Self {
        Self {
            db_pool,
            cache_pool,
        }
    }

    /// Build the repository strategy named by `choice`.
    ///
    /// The chained strategy holds [cache, persistent] in that fixed order;
    /// precedence is decided here and never changes afterwards.
    pub fn repository(&self, choice: RepositoryChoice) -> Arc<dyn PostRepository> {
        match choice {
            RepositoryChoice::Cache => Arc::new(self.cache_repository()),
            RepositoryChoice::Persistent => Arc::new(self.persistent_repository()),
            RepositoryChoice::Chained => {
                let mut chain = ChainPostRepository::new();
                chain.add(Arc::new(self.cache_repository()));
                chain.add(Arc::new(self.persistent_repository()));
                Arc::new(chain)
            }
        }
    }

    /// Build the cache-backed member.
    pub fn cache_repository(&self) -> RedisPostRepository {
        RedisPostRepository::new(self.cache_pool.clone())
    }

    /// Build the database-backed member.
    pub fn persistent_repository(&self) -> DieselPostRepository {
        DieselPostRepository::new(self.db_pool.clone())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("cache", RepositoryChoice::Cache)]
    #[case("persistent", RepositoryChoice::Persistent)]
    #[case("chained", RepositoryChoice::Chained)]
    fn choices_parse_from_configuration_names(
        #[case] value: &str,
        #[case] expected: RepositoryChoice,
    ) {
        assert_eq!(value.parse::<RepositoryChoice>(), Ok(expected));
        assert_eq!(expected.as_str(), value);
    }

    #[rstest]
    fn unknown_strategies_are_rejected_not_defaulted() {
        let err = "redis"
            .parse::<RepositoryChoice>()
            .expect_err("unknown strategy must fail");
        assert_eq!(err.value, "redis");
    }

    #[rstest]
    fn the_default_choice_is_the_chain() {
        assert_eq!(RepositoryChoice::default(), RepositoryChoice::Chained);
    }
}
