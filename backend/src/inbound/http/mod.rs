//! HTTP inbound adapter exposing the admin REST endpoints.

pub mod error;
pub mod health;
pub mod posts;
pub mod session;
pub mod state;

pub use error::ApiResult;
