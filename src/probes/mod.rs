//! HTTP probes: liveness, readiness and Prometheus metrics
//!
//! Every handler recomputes its answer from the heartbeat log, the freshness
//! marker and the chain client on each request; nothing is cached.

pub mod liveness;
pub mod metrics;
pub mod readiness;
pub mod state;

pub use liveness::*;
pub use metrics::*;
pub use readiness::*;
pub use state::*;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
