//! OpenAPI document for the admin REST surface.

use utoipa::OpenApi;

use crate::domain::error::{Error, ErrorCode};
use crate::inbound::http::posts::{PostBody, PostResponseBody};

/// Aggregated OpenAPI description served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::show_post,
        crate::inbound::http::posts::edit_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(PostBody, PostResponseBody, Error, ErrorCode)),
    tags(
        (name = "admin-posts", description = "Admin blog post management"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn document_lists_the_admin_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/admin/posts"));
        assert!(
            paths
                .iter()
                .any(|p| p.as_str() == "/api/v1/admin/posts/{id}")
        );
    }
}
