//! Domain ports for the hexagonal boundary.
//!
//! Outbound adapters implement these traits; inbound adapters consume them
//! through `Arc<dyn Trait>` without knowing which strategy answers.

mod post_command;
mod post_repository;

#[cfg(test)]
pub use post_command::MockPostCommand;
pub use post_command::{FixturePostCommand, PostCommand, PostCommandError};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{
    FixturePostRepository, PostField, PostQuery, PostRepository, PostRepositoryError,
    SortDirection,
};
