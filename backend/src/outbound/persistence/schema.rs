//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Blog posts table.
    ///
    /// One row per post; tags live inline as a text array because nothing in
    /// the backend queries tags independently of their post.
    posts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Headline shown in listings.
        title -> Varchar,
        /// URL-safe identifier derived from the title, unique.
        slug -> Varchar,
        /// Short abstract shown in listings.
        summary -> Text,
        /// Full article body.
        content -> Text,
        /// Author's user id.
        author_id -> Uuid,
        /// Free-form labels, at most ten per post.
        tags -> Array<Text>,
        /// Publication timestamp.
        published_at -> Timestamptz,
    }
}
