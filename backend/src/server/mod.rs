//! HTTP server assembly.
//!
//! `build_app` wires the middleware, session layer, and routes onto an
//! Actix `App`; `main` and the integration tests share it so both exercise
//! the same routing table.

pub mod config;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::{App, HttpResponse, web};
use utoipa::OpenApi;

use crate::doc::ApiDoc;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::posts::{create_post, delete_post, edit_post, list_posts, show_post};
use crate::inbound::http::state::HttpState;

pub use config::{AppConfig, ConfigError};

/// Build the session middleware used by the admin surface.
pub fn session_middleware(key: Key, cookie_secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build()
}

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Assemble the application with all routes and middleware.
pub fn build_app(
    state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
    key: Key,
    cookie_secure: bool,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let admin = web::scope("/api/v1/admin/posts")
        .wrap(session_middleware(key, cookie_secure))
        .service(list_posts)
        .service(create_post)
        .service(show_post)
        .service(edit_post)
        .service(delete_post);

    App::new()
        .app_data(state)
        .app_data(health_state)
        .service(admin)
        .service(ready)
        .service(live)
        .route("/api-docs/openapi.json", web::get().to(openapi_json))
}
