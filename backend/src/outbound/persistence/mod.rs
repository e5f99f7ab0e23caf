//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain's post ports backed by PostgreSQL
//! via `diesel-async` with `bb8` connection pooling.
//!
//! Diesel row structs (`models.rs`) and table definitions (`schema.rs`) are
//! internal implementation details, never exposed to the domain layer, and
//! every database error is mapped to a typed port error.

mod diesel_post_repository;
mod models;
mod pool;
mod schema;

pub use diesel_post_repository::DieselPostRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
