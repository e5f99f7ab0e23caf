//! Diesel row structs for the persistence adapter.
//!
//! These are internal translation types between the `posts` table and the
//! domain `Post`; they never cross the port boundary.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{Post, PostId, UserId};

use super::schema::posts;

/// A full row read from the `posts` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PostRow {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub content: String,
    pub author_id: Uuid,
    pub tags: Vec<String>,
    pub published_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: PostId::from_uuid(row.id),
            title: row.title,
            slug: row.slug,
            summary: row.summary,
            content: row.content,
            author_id: UserId::from_uuid(row.author_id),
            tags: row.tags,
            published_at: row.published_at,
        }
    }
}

/// Insertable row for creating a post.
#[derive(Debug, Insertable)]
#[diesel(table_name = posts)]
pub struct NewPostRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub slug: &'a str,
    pub summary: &'a str,
    pub content: &'a str,
    pub author_id: Uuid,
    pub tags: &'a [String],
    pub published_at: DateTime<Utc>,
}

/// Changeset applied when editing a post.
///
/// Author and publication timestamp are immutable after creation; the admin
/// edit flow only rewrites the textual fields and tags.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = posts)]
pub struct PostChangeset<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub summary: &'a str,
    pub content: &'a str,
    pub tags: &'a [String],
}
