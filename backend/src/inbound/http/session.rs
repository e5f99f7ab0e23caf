//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! A thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: who is the caller, and which roles do they
//! hold. The session layer trusts the signed cookie but not its contents;
//! malformed values are treated as an anonymous caller rather than a fault.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Role, RoleCollection, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const ROLES_KEY: &str = "roles";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated principal in the session cookie.
    pub fn persist_principal(&self, user_id: &UserId, roles: &RoleCollection) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .and_then(|()| self.0.insert(ROLES_KEY, roles.names()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match raw {
            Some(value) => match value.parse() {
                Ok(id) => Ok(Some(UserId::from_uuid(id))),
                Err(error) => {
                    tracing::warn!("invalid user id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Roles held by the current session.
    ///
    /// A cookie naming an unknown role yields an empty collection (with a
    /// warning) rather than an error: stale cookies from an older deploy
    /// should degrade to "no permissions", not to a 500.
    pub fn roles(&self) -> Result<RoleCollection, Error> {
        let names = self
            .0
            .get::<Vec<String>>(ROLES_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?
            .unwrap_or_default();

        match RoleCollection::try_from_names(&names) {
            Ok(roles) => Ok(roles),
            Err(error) => {
                tracing::warn!("invalid role in session cookie: {error}");
                Ok(RoleCollection::empty())
            }
        }
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require an authenticated administrator, returning `401` without a
    /// session and `403` without the admin role.
    pub fn require_admin(&self) -> Result<UserId, Error> {
        let user_id = self.require_user_id()?;
        if !self.roles()?.contains(Role::Admin) {
            return Err(Error::forbidden("administrator role required"));
        }
        Ok(user_id)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use actix_web::cookie::Key;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, ResponseError, test, web};
    use rstest::rstest;

    use super::*;
    use crate::server::session_middleware;

    async fn set_principal(session: SessionContext, roles: web::Json<Vec<String>>) -> HttpResponse {
        let parsed = RoleCollection::try_from_names(roles.iter()).unwrap_or_default();
        match session.persist_principal(&UserId::random(), &parsed) {
            Ok(()) => HttpResponse::Ok().finish(),
            Err(_) => HttpResponse::InternalServerError().finish(),
        }
    }

    async fn admin_only(session: SessionContext) -> HttpResponse {
        match session.require_admin() {
            Ok(_) => HttpResponse::Ok().finish(),
            Err(err) => err.error_response(),
        }
    }

    fn app_factory() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(session_middleware(Key::generate(), false))
            .route("/login", web::post().to(set_principal))
            .route("/admin", web::get().to(admin_only))
    }

    #[rstest]
    #[case(vec!["ROLE_ADMIN".to_owned()], StatusCode::OK)]
    #[case(vec!["ROLE_USER".to_owned()], StatusCode::FORBIDDEN)]
    #[actix_web::test]
    async fn admin_guard_checks_the_role(
        #[case] roles: Vec<String>,
        #[case] expected: StatusCode,
    ) {
        let app = test::init_service(app_factory()).await;

        let login = test::TestRequest::post()
            .uri("/login")
            .set_json(&roles)
            .to_request();
        let login_resp = test::call_service(&app, login).await;
        let cookie = login_resp
            .response()
            .cookies()
            .next()
            .expect("session cookie set")
            .into_owned();

        let admin = test::TestRequest::get()
            .uri("/admin")
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, admin).await;
        assert_eq!(resp.status(), expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn anonymous_callers_are_unauthorized() {
        let app = test::init_service(app_factory()).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/admin").to_request())
            .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
