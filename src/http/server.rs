//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the skill endpoint and health check
//! - Wire up middleware (tracing, timeout, body limit, request ID)
//! - Decode request envelopes and hand them to the skill
//! - Map pipeline failures to HTTP status codes
//! - Record per-invocation metrics

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::SkillConfig;
use crate::envelope::RequestEnvelope;
use crate::http::request::{make_span, MakeInvocationId};
use crate::observability::metrics::{self, Outcome};
use crate::skill::{Skill, SkillError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub skill: Arc<Skill>,
}

/// HTTP host for the skill.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server hosting the taxi skill built from `config`.
    pub fn new(config: SkillConfig) -> Self {
        let skill = Arc::new(Skill::taxi(&config));
        Self::with_skill(config, skill)
    }

    /// Create a server hosting an already assembled skill.
    pub fn with_skill(config: SkillConfig, skill: Arc<Skill>) -> Self {
        let router = Self::build_router(&config, AppState { skill });
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &SkillConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeInvocationId))
            .layer(TraceLayer::new_for_http().make_span_with(make_span))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        Router::new()
            .route("/", post(skill_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(middleware)
    }

    /// The router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub version: &'static str,
    pub status: &'static str,
}

async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

/// Skill endpoint: request envelope in, response envelope out.
async fn skill_handler(
    State(state): State<AppState>,
    payload: Result<Json<RequestEnvelope>, JsonRejection>,
) -> Response {
    let start = Instant::now();

    let Json(envelope) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Malformed request envelope");
            let status = match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
                _ => StatusCode::BAD_REQUEST,
            };
            return (status, rejection.body_text()).into_response();
        }
    };

    let request_type = envelope.request.request_type();

    match state.skill.process(&envelope) {
        Ok(invocation) => {
            let outcome = if invocation.recovered {
                Outcome::Recovered
            } else {
                Outcome::Ok
            };
            metrics::record_invocation(request_type, outcome, start);
            (StatusCode::OK, Json(invocation.envelope)).into_response()
        }
        Err(e @ SkillError::SkillIdMismatch { .. }) => {
            tracing::warn!(error = %e, "Rejected request envelope");
            metrics::record_invocation(request_type, Outcome::Rejected, start);
            (StatusCode::BAD_REQUEST, "Invalid skill id").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, request_type, "Skill invocation failed");
            metrics::record_invocation(request_type, Outcome::Failed, start);
            (StatusCode::INTERNAL_SERVER_ERROR, "Skill invocation failed").into_response()
        }
    }
}
