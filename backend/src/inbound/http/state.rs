//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O. Which concrete
//! repository strategy sits behind `posts` (cache, persistent, or the
//! chain) is the factory's business; handlers cannot tell.

use std::sync::Arc;

use crate::domain::ports::{PostCommand, PostRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Read side: whichever repository strategy the factory built.
    pub posts: Arc<dyn PostRepository>,
    /// Write side: always the persistent store.
    pub post_commands: Arc<dyn PostCommand>,
}

impl HttpState {
    /// Bundle the ports handlers need.
    pub fn new(posts: Arc<dyn PostRepository>, post_commands: Arc<dyn PostCommand>) -> Self {
        Self {
            posts,
            post_commands,
        }
    }
}
