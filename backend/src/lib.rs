//! Blog administration backend.
//!
//! Hexagonal layout: `domain` holds entities and ports, `outbound` the
//! Redis/PostgreSQL adapters plus the repository chain and factory,
//! `inbound` the Actix HTTP surface, and `server` the app assembly.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
