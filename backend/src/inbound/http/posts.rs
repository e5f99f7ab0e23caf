//! Admin post CRUD handlers.
//!
//! ```text
//! GET    /api/v1/admin/posts
//! POST   /api/v1/admin/posts
//! GET    /api/v1/admin/posts/{id}
//! PUT    /api/v1/admin/posts/{id}
//! DELETE /api/v1/admin/posts/{id}
//! ```
//!
//! Every route requires an authenticated administrator. Listing is scoped
//! to the caller's own posts, newest first, and the single-post routes
//! refuse posts authored by somebody else.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::PostQuery;
use crate::domain::{Error, Post, PostDraft, PostId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request payload for creating or editing a post.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostBody {
    /// Headline; the slug is derived from it server-side.
    pub title: String,
    /// Short abstract shown in listings.
    pub summary: String,
    /// Full article body.
    pub content: String,
    /// Free-form labels, at most ten.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Response payload for a single post.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponseBody {
    /// Post identifier.
    #[schema(format = "uuid")]
    pub id: Uuid,
    /// Headline.
    pub title: String,
    /// URL-safe identifier derived from the title.
    pub slug: String,
    /// Short abstract.
    pub summary: String,
    /// Full article body.
    pub content: String,
    /// Author's user id.
    #[schema(format = "uuid")]
    pub author_id: Uuid,
    /// Labels attached to the post.
    pub tags: Vec<String>,
    /// Publication timestamp.
    pub published_at: chrono::DateTime<chrono::Utc>,
}

impl From<Post> for PostResponseBody {
    fn from(post: Post) -> Self {
        Self {
            id: *post.id.as_uuid(),
            title: post.title,
            slug: post.slug,
            summary: post.summary,
            content: post.content,
            author_id: *post.author_id.as_uuid(),
            tags: post.tags,
            published_at: post.published_at,
        }
    }
}

fn draft_from_body(body: PostBody, author_id: UserId) -> Result<PostDraft, Error> {
    PostDraft::new(
        &body.title,
        &body.summary,
        &body.content,
        author_id,
        body.tags,
    )
    .map_err(|err| Error::invalid_request(err.to_string()))
}

/// Fetch `id` through the repository chain and refuse posts the caller does
/// not own.
async fn load_owned_post(
    state: &HttpState,
    id: PostId,
    author_id: UserId,
    refusal: &str,
) -> Result<Post, Error> {
    let post = state
        .posts
        .find_by_id(&id)
        .await?
        .ok_or_else(|| Error::not_found(format!("post {id} not found")))?;
    if post.author_id != author_id {
        return Err(Error::forbidden(refusal));
    }
    Ok(post)
}

/// List the caller's posts, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/admin/posts",
    responses(
        (status = 200, description = "Posts authored by the caller", body = [PostResponseBody]),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 403, description = "Not an administrator", body = Error)
    ),
    tags = ["admin-posts"],
    operation_id = "listAdminPosts"
)]
#[get("")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<PostResponseBody>>> {
    let author_id = session.require_admin()?;

    let posts = state
        .posts
        .find_by(&PostQuery::authored_by(author_id))
        .await?;

    Ok(web::Json(
        posts.into_iter().map(PostResponseBody::from).collect(),
    ))
}

/// Create a post authored by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/admin/posts",
    request_body = PostBody,
    responses(
        (status = 201, description = "Post created", body = PostResponseBody),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 403, description = "Not an administrator", body = Error)
    ),
    tags = ["admin-posts"],
    operation_id = "createAdminPost"
)]
#[post("")]
pub async fn create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<PostBody>,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_admin()?;
    let draft = draft_from_body(body.into_inner(), author_id)?;

    let created = state.post_commands.create(draft).await?;
    tracing::info!(post_id = %created.id, "post created");

    Ok(HttpResponse::Created().json(PostResponseBody::from(created)))
}

/// Show one of the caller's posts.
#[utoipa::path(
    get,
    path = "/api/v1/admin/posts/{id}",
    params(("id" = Uuid, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "The post", body = PostResponseBody),
        (status = 403, description = "Post belongs to another author", body = Error),
        (status = 404, description = "No such post", body = Error)
    ),
    tags = ["admin-posts"],
    operation_id = "showAdminPost"
)]
#[get("/{id}")]
pub async fn show_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<PostResponseBody>> {
    let author_id = session.require_admin()?;
    let id = PostId::from_uuid(id.into_inner());

    let post = load_owned_post(
        &state,
        id,
        author_id,
        "posts can only be shown to their authors",
    )
    .await?;

    Ok(web::Json(PostResponseBody::from(post)))
}

/// Edit one of the caller's posts; the slug is re-derived from the title.
#[utoipa::path(
    put,
    path = "/api/v1/admin/posts/{id}",
    params(("id" = Uuid, Path, description = "Post identifier")),
    request_body = PostBody,
    responses(
        (status = 200, description = "Updated post", body = PostResponseBody),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 403, description = "Post belongs to another author", body = Error),
        (status = 404, description = "No such post", body = Error)
    ),
    tags = ["admin-posts"],
    operation_id = "editAdminPost"
)]
#[put("/{id}")]
pub async fn edit_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
    body: web::Json<PostBody>,
) -> ApiResult<web::Json<PostResponseBody>> {
    let author_id = session.require_admin()?;
    let id = PostId::from_uuid(id.into_inner());

    load_owned_post(
        &state,
        id,
        author_id,
        "posts can only be edited by their authors",
    )
    .await?;

    let draft = draft_from_body(body.into_inner(), author_id)?;
    let updated = state.post_commands.update(&id, draft).await?;
    tracing::info!(post_id = %updated.id, "post updated");

    Ok(web::Json(PostResponseBody::from(updated)))
}

/// Delete one of the caller's posts.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/posts/{id}",
    params(("id" = Uuid, Path, description = "Post identifier")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 403, description = "Post belongs to another author", body = Error),
        (status = 404, description = "No such post", body = Error)
    ),
    tags = ["admin-posts"],
    operation_id = "deleteAdminPost"
)]
#[delete("/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let author_id = session.require_admin()?;
    let id = PostId::from_uuid(id.into_inner());

    load_owned_post(
        &state,
        id,
        author_id,
        "posts can only be deleted by their authors",
    )
    .await?;

    state.post_commands.delete(&id).await?;
    tracing::info!(post_id = %id, "post deleted");

    Ok(HttpResponse::NoContent().finish())
}
