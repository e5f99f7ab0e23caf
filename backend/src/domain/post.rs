//! Blog post entity and its validated draft.
//!
//! `Post` is the persisted aggregate the repositories look up; `PostDraft`
//! carries validated input on the way in. Slug derivation happens at draft
//! construction so every adapter stores the same slug for the same title.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::slug::slugify;

/// Maximum number of tags a single post may carry.
pub const MAX_TAGS_PER_POST: usize = 10;

/// Identifier newtype for blog posts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct PostId(Uuid);

impl PostId {
    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier newtype for post authors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A published or draft blog post.
///
/// ## Invariants
/// - `title`, `summary`, and `content` are non-blank.
/// - `slug` is derived from the title via [`slugify`].
/// - `tags` holds at most [`MAX_TAGS_PER_POST`] non-blank entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Primary identifier.
    pub id: PostId,
    /// Headline shown in listings.
    pub title: String,
    /// URL-safe identifier derived from the title.
    pub slug: String,
    /// Short abstract shown in listings.
    pub summary: String,
    /// Full article body.
    pub content: String,
    /// Author of the post.
    pub author_id: UserId,
    /// Free-form labels attached to the post.
    pub tags: Vec<String>,
    /// Publication timestamp.
    pub published_at: DateTime<Utc>,
}

/// Validation errors raised while constructing a [`PostDraft`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostValidationError {
    /// Title was empty or whitespace-only.
    #[error("post title must not be blank")]
    BlankTitle,
    /// Title produced an empty slug (no alphanumeric content).
    #[error("post title must contain alphanumeric characters")]
    UnsluggableTitle,
    /// Summary was empty or whitespace-only.
    #[error("post summary must not be blank")]
    BlankSummary,
    /// Content was empty or whitespace-only.
    #[error("post content must not be blank")]
    BlankContent,
    /// A tag was empty or whitespace-only.
    #[error("post tags must not be blank")]
    BlankTag,
    /// More tags than [`MAX_TAGS_PER_POST`] were supplied.
    #[error("a post carries at most {MAX_TAGS_PER_POST} tags")]
    TooManyTags,
}

/// Validated input for creating or editing a post.
///
/// The slug is computed from the title at construction; editing a post with
/// a new title therefore re-slugifies it, matching the admin edit flow.
///
/// # Examples
/// ```
/// use blog_backend::domain::{PostDraft, UserId};
///
/// let draft = PostDraft::new(
///     "Hello World!",
///     "a summary",
///     "the body",
///     UserId::random(),
///     vec!["intro".to_owned()],
/// )
/// .expect("valid draft");
/// assert_eq!(draft.slug(), "hello-world");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    title: String,
    slug: String,
    summary: String,
    content: String,
    author_id: UserId,
    tags: Vec<String>,
}

impl PostDraft {
    /// Validate raw input and derive the slug.
    pub fn new(
        title: &str,
        summary: &str,
        content: &str,
        author_id: UserId,
        tags: Vec<String>,
    ) -> Result<Self, PostValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(PostValidationError::BlankTitle);
        }
        let slug = slugify(title);
        if slug.is_empty() {
            return Err(PostValidationError::UnsluggableTitle);
        }
        let summary = summary.trim();
        if summary.is_empty() {
            return Err(PostValidationError::BlankSummary);
        }
        let content = content.trim();
        if content.is_empty() {
            return Err(PostValidationError::BlankContent);
        }
        if tags.len() > MAX_TAGS_PER_POST {
            return Err(PostValidationError::TooManyTags);
        }
        let mut trimmed_tags = Vec::with_capacity(tags.len());
        for tag in &tags {
            let tag = tag.trim();
            if tag.is_empty() {
                return Err(PostValidationError::BlankTag);
            }
            trimmed_tags.push(tag.to_owned());
        }

        Ok(Self {
            title: title.to_owned(),
            slug,
            summary: summary.to_owned(),
            content: content.to_owned(),
            author_id,
            tags: trimmed_tags,
        })
    }

    /// Validated title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Slug derived from the title.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Validated summary.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Validated body.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Author the post belongs to.
    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Validated tags.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Materialize the draft into a post with the given identity and
    /// publication timestamp.
    pub fn into_post(self, id: PostId, published_at: DateTime<Utc>) -> Post {
        Post {
            id,
            title: self.title,
            slug: self.slug,
            summary: self.summary,
            content: self.content,
            author_id: self.author_id,
            tags: self.tags,
            published_at,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn draft(title: &str, tags: Vec<String>) -> Result<PostDraft, PostValidationError> {
        PostDraft::new(title, "summary", "content", UserId::random(), tags)
    }

    #[rstest]
    #[case("", PostValidationError::BlankTitle)]
    #[case("   ", PostValidationError::BlankTitle)]
    #[case("!!!", PostValidationError::UnsluggableTitle)]
    fn invalid_titles_are_rejected(#[case] title: &str, #[case] expected: PostValidationError) {
        let err = draft(title, vec![]).expect_err("invalid title must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn blank_summary_and_content_are_rejected() {
        let author = UserId::random();
        assert_eq!(
            PostDraft::new("a title", " ", "content", author, vec![]),
            Err(PostValidationError::BlankSummary)
        );
        assert_eq!(
            PostDraft::new("a title", "summary", "\n", author, vec![]),
            Err(PostValidationError::BlankContent)
        );
    }

    #[rstest]
    fn tags_are_trimmed_and_bounded() {
        let ok = draft("a title", vec!["  rust ".to_owned()]).expect("valid draft");
        assert_eq!(ok.tags(), ["rust"]);

        let blank = draft("a title", vec!["  ".to_owned()]);
        assert_eq!(blank, Err(PostValidationError::BlankTag));

        let many = vec!["t".to_owned(); MAX_TAGS_PER_POST + 1];
        assert_eq!(draft("a title", many), Err(PostValidationError::TooManyTags));
    }

    #[rstest]
    fn into_post_carries_the_derived_slug() {
        let author = UserId::random();
        let published_at = Utc::now();
        let post = PostDraft::new("Hello World!", "s", "c", author, vec![])
            .expect("valid draft")
            .into_post(PostId::random(), published_at);

        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.author_id, author);
        assert_eq!(post.published_at, published_at);
    }
}
