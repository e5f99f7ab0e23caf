//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and
//! status codes. Port errors are converted here too, so handlers can use
//! `?` on repository and command calls.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::ports::{PostCommandError, PostRepositoryError};
use crate::domain::{Error, ErrorCode};

/// Result alias HTTP handlers return.
pub use crate::domain::ApiResult;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(err: &Error) -> Error {
    if matches!(err.code(), ErrorCode::InternalError) {
        Error::internal("Internal server error")
    } else {
        err.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Self::internal("Internal server error")
    }
}

impl From<PostRepositoryError> for Error {
    fn from(err: PostRepositoryError) -> Self {
        error!(error = %err, "post lookup failed");
        match err {
            PostRepositoryError::Connection { .. } => {
                Self::service_unavailable("post storage unavailable")
            }
            PostRepositoryError::Query { .. } | PostRepositoryError::Serialization { .. } => {
                Self::internal("post lookup failed")
            }
        }
    }
}

impl From<PostCommandError> for Error {
    fn from(err: PostCommandError) -> Self {
        match err {
            PostCommandError::NotFound { id } => Self::not_found(format!("post {id} not found")),
            PostCommandError::Connection { .. } => {
                error!(error = %err, "post write failed");
                Self::service_unavailable("post storage unavailable")
            }
            PostCommandError::Query { .. } => {
                error!(error = %err, "post write failed");
                Self::internal("post write failed")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::PostId;
    use rstest::rstest;

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("who"), StatusCode::UNAUTHORIZED)]
    #[case(Error::forbidden("no"), StatusCode::FORBIDDEN)]
    #[case(Error::not_found("gone"), StatusCode::NOT_FOUND)]
    #[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_statuses(#[case] err: Error, #[case] expected: StatusCode) {
        assert_eq!(err.status_code(), expected);
    }

    #[rstest]
    fn internal_errors_are_redacted() {
        let redacted = redact_if_internal(&Error::internal("secret detail"));
        assert_eq!(redacted.message(), "Internal server error");

        let untouched = redact_if_internal(&Error::not_found("post 5 not found"));
        assert_eq!(untouched.message(), "post 5 not found");
    }

    #[rstest]
    fn connection_faults_surface_as_service_unavailable() {
        let err: Error = PostRepositoryError::connection("redis down").into();
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    fn missing_rows_surface_as_not_found() {
        let id = PostId::random();
        let err: Error = PostCommandError::not_found(id).into();
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(err.message().contains(&id.to_string()));
    }
}
