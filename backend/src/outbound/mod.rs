//! Outbound adapters implementing the domain ports.
//!
//! - `cache` — Redis-backed `PostRepository`.
//! - `persistence` — Diesel/PostgreSQL-backed `PostRepository` and
//!   `PostCommand`.
//! - `chain` — composite repository, first hit wins.
//! - `factory` — strategy selection over the shared pools.

pub mod cache;
pub mod chain;
pub mod factory;
pub mod persistence;

pub use chain::ChainPostRepository;
pub use factory::{PostRepositoryFactory, RepositoryChoice, RepositoryChoiceParseError};
