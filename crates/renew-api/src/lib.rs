//! # renew-api: Update License Renewal Service
//!
//! Axum HTTP surface over the renewal engine. Resolves the caller's license,
//! prices the fixed renewal plans under the configured discount, and
//! classifies the license's update window.
//!
//! ## API Surface
//!
//! | Route                         | Module                | Auth |
//! |-------------------------------|-----------------------|------|
//! | `GET /v1/renewals/quote`      | [`routes::renewals`]  | yes  |
//! | `POST /v1/renewals/selection` | [`routes::renewals`]  | yes  |
//! | `GET /openapi.json`           | [`openapi`]           | yes  |
//! | `GET /health/*`               | this module           | no   |
//! | `GET /metrics`                | this module           | no   |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → AuthMiddleware → Handler
//! ```

pub mod auth;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::auth::AuthConfig;
use crate::error::AppError;
use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes and `/metrics` are mounted outside the auth middleware.
pub fn app(state: AppState) -> Router {
    let auth_config = AuthConfig {
        secret: state.config.auth_token.clone(),
    };
    let metrics = ApiMetrics::new();

    let api = Router::new()
        .merge(routes::renewals::router())
        .merge(openapi::router())
        .layer(from_fn(auth::auth_middleware))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(axum::Extension(auth_config))
        .layer(axum::Extension(metrics))
        .with_state(state.clone());

    let public = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .route("/metrics", get(prometheus_metrics))
        .with_state(state);

    Router::new().merge(public).merge(api)
}

/// Liveness probe: 200 while the process runs.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe.
async fn readiness() -> &'static str {
    "ready"
}

/// Prometheus text exposition, 404 when no recorder was installed.
async fn prometheus_metrics(State(state): State<AppState>) -> Result<String, AppError> {
    state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .ok_or_else(|| AppError::NotFound("metrics recorder not installed".into()))
}
