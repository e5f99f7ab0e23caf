//! PostgreSQL-backed post repository and command adapter using Diesel ORM.
//!
//! Implements both the query port (`PostRepository`) and the command port
//! (`PostCommand`). The adapter only translates between Diesel rows and
//! domain types; validation and slug derivation happened upstream in
//! `PostDraft`.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{
    PostCommand, PostCommandError, PostField, PostQuery, PostRepository, PostRepositoryError,
    SortDirection,
};
use crate::domain::{Post, PostDraft, PostId};

use super::models::{NewPostRow, PostChangeset, PostRow};
use super::pool::{DbPool, PoolError};
use super::schema::posts;

/// Diesel-backed implementation of the post ports.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new adapter over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to query-port errors.
fn map_pool_error(error: PoolError) -> PostRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            PostRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to query-port errors.
fn map_diesel_error(error: diesel::result::Error) -> PostRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PostRepositoryError::connection("database connection error")
        }
        DieselError::SerializationError(_) | DieselError::DeserializationError(_) => {
            PostRepositoryError::serialization("database row undecodable")
        }
        _ => PostRepositoryError::query("database error"),
    }
}

/// Map query-port errors to command-port errors.
fn into_command_error(error: PostRepositoryError) -> PostCommandError {
    match error {
        PostRepositoryError::Connection { message } => PostCommandError::connection(message),
        PostRepositoryError::Query { message } | PostRepositoryError::Serialization { message } => {
            PostCommandError::query(message)
        }
    }
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PostRow> = posts::table
            .find(id.as_uuid())
            .select(PostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Post::from))
    }

    async fn find_by(&self, query: &PostQuery) -> Result<Vec<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut select = posts::table
            .select(PostRow::as_select())
            .into_boxed();

        if let Some(author) = query.author {
            select = select.filter(posts::author_id.eq(*author.as_uuid()));
        }
        if let Some(slug) = &query.slug {
            select = select.filter(posts::slug.eq(slug.clone()));
        }

        select = match (query.order_by, query.direction) {
            (PostField::PublishedAt, SortDirection::Asc) => {
                select.order(posts::published_at.asc())
            }
            (PostField::PublishedAt, SortDirection::Desc) => {
                select.order(posts::published_at.desc())
            }
            (PostField::Title, SortDirection::Asc) => select.order(posts::title.asc()),
            (PostField::Title, SortDirection::Desc) => select.order(posts::title.desc()),
        };

        let rows: Vec<PostRow> = select.load(&mut conn).await.map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }
}

#[async_trait]
impl PostCommand for DieselPostRepository {
    async fn create(&self, draft: PostDraft) -> Result<Post, PostCommandError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| into_command_error(map_pool_error(err)))?;

        let new_row = NewPostRow {
            id: *PostId::random().as_uuid(),
            title: draft.title(),
            slug: draft.slug(),
            summary: draft.summary(),
            content: draft.content(),
            author_id: *draft.author_id().as_uuid(),
            tags: draft.tags(),
            published_at: Utc::now(),
        };

        let row: PostRow = diesel::insert_into(posts::table)
            .values(&new_row)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| into_command_error(map_diesel_error(err)))?;

        Ok(Post::from(row))
    }

    async fn update(&self, id: &PostId, draft: PostDraft) -> Result<Post, PostCommandError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| into_command_error(map_pool_error(err)))?;

        let changeset = PostChangeset {
            title: draft.title(),
            slug: draft.slug(),
            summary: draft.summary(),
            content: draft.content(),
            tags: draft.tags(),
        };

        let row: Option<PostRow> = diesel::update(posts::table.find(id.as_uuid()))
            .set(&changeset)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| into_command_error(map_diesel_error(err)))?;

        row.map(Post::from).ok_or(PostCommandError::NotFound { id: *id })
    }

    async fn delete(&self, id: &PostId) -> Result<(), PostCommandError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| into_command_error(map_pool_error(err)))?;

        // Tags live inline on the row, so deleting the row clears them too.
        let deleted = diesel::delete(posts::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(|err| into_command_error(map_diesel_error(err)))?;

        if deleted == 0 {
            return Err(PostCommandError::NotFound { id: *id });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(err, PostRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn not_found_rows_map_to_query_errors() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, PostRepositoryError::Query { .. }));
    }

    #[rstest]
    fn deserialization_failures_map_to_serialization_errors() {
        let err = map_diesel_error(diesel::result::Error::DeserializationError(
            "bad row".into(),
        ));
        assert!(matches!(err, PostRepositoryError::Serialization { .. }));
    }

    #[rstest]
    fn command_mapping_preserves_the_fault_kind() {
        let connection = into_command_error(PostRepositoryError::connection("down"));
        assert!(matches!(connection, PostCommandError::Connection { .. }));

        let query = into_command_error(PostRepositoryError::query("syntax"));
        assert!(matches!(query, PostCommandError::Query { .. }));
    }
}
