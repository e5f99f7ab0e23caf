//! Backend entry-point: wires pools, the repository factory, and the HTTP
//! server.

use std::sync::Arc;

use actix_web::{HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use blog_backend::inbound::http::health::HealthState;
use blog_backend::inbound::http::state::HttpState;
use blog_backend::outbound::PostRepositoryFactory;
use blog_backend::outbound::cache::{CachePool, CachePoolConfig};
use blog_backend::outbound::persistence::{DbPool, PoolConfig};
use blog_backend::server::{AppConfig, build_app};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;
    let key = config.load_session_key()?;

    let db_pool = DbPool::new(PoolConfig::new(&config.database_url))
        .await
        .map_err(std::io::Error::other)?;
    let cache_pool = CachePool::new(CachePoolConfig::new(&config.redis_url))
        .await
        .map_err(std::io::Error::other)?;

    let factory = PostRepositoryFactory::new(db_pool, cache_pool);
    let state = web::Data::new(HttpState::new(
        factory.repository(config.repository_choice),
        Arc::new(factory.persistent_repository()),
    ));
    info!(strategy = %config.repository_choice, "repository strategy selected");

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays accessible.
    let server_health_state = health_state.clone();
    let cookie_secure = config.cookie_secure;
    let server = HttpServer::new(move || {
        build_app(
            state.clone(),
            server_health_state.clone(),
            key.clone(),
            cookie_secure,
        )
    })
    .bind(config.bind_addr)?
    // Signals are handled below so readiness drops before the stop.
    .disable_signals()
    .run();

    let server_handle = server.handle();
    let drain_state = health_state.clone();
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        info!("shutdown signal received; draining");
        drain_state.mark_draining();
        server_handle.stop(true).await;
    });

    health_state.mark_ready();
    server.await
}

/// Resolve on SIGTERM or ctrl-c, whichever arrives first.
async fn wait_for_shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(error) => {
            warn!(%error, "SIGTERM handler unavailable; listening for ctrl-c only");
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigterm.recv() => {}
    }
}
