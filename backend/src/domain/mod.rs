//! Domain primitives and ports.
//!
//! Purpose: define strongly typed domain entities and the port traits the
//! adapters implement. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - `Error` / `ErrorCode` — transport-agnostic error payload.
//! - `Post`, `PostDraft`, `PostId`, `UserId` — blog post aggregate.
//! - `Role`, `RoleCollection` — permission tokens and their persistent set.
//! - `ports` — repository and command traits plus their adapters' errors.

pub mod error;
pub mod ports;
pub mod post;
pub mod role;
pub mod slug;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::post::{MAX_TAGS_PER_POST, Post, PostDraft, PostId, PostValidationError, UserId};
pub use self::role::{Role, RoleCollection, RoleParseError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use blog_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
