//! Orchestration probes.
//!
//! Readiness gates traffic: it starts refusing, admits once the pools are
//! built, and refuses again while the server drains ahead of shutdown.
//! Liveness carries no state at all; a process that can answer the request
//! is alive, and one that cannot answers nothing.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

/// Traffic gate shared between the bootstrap and the readiness probe.
#[derive(Debug, Default)]
pub struct HealthState {
    ready: AtomicBool,
}

impl HealthState {
    /// A gate that refuses traffic until [`HealthState::mark_ready`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit traffic once startup has finished.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Refuse new traffic while in-flight requests drain.
    pub fn mark_draining(&self) {
        self.ready.store(false, Ordering::Release);
    }

    /// Whether the service currently accepts new traffic.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

// Probe answers must never be cached by intermediaries.
fn probe(admitting: bool) -> HttpResponse {
    let mut response = if admitting {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe: 200 while the service accepts new traffic, 503 during
/// startup and drain.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Service accepts new traffic"),
        (status = 503, description = "Service is starting or draining")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.is_ready())
}

/// Liveness probe: answering at all is the signal.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses((status = 200, description = "Process is alive"))
)]
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    probe(true)
}
