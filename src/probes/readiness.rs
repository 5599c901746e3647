//! `GET /readyz`

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::warn;
use crate::{
    errors::{ProbeError, ProbeResult},
    network::block_number_within,
};
use super::AppState;

/// Ready iff the RPC answers within the timeout AND the route log exists.
/// The RPC is checked first.
pub async fn check_readiness(state: &AppState) -> ProbeResult<u64> {
    let block = block_number_within(state.chain.as_ref(), state.rpc_timeout).await?;

    match state.freshness.is_present().await {
        Ok(true) => Ok(block),
        Ok(false) => Err(ProbeError::missing(
            "Swap routes log not ready",
            state.freshness.path(),
        )),
        Err(e) => Err(ProbeError::fault("Failed to check swap routes log", e)),
    }
}

pub async fn readyz(State(state): State<AppState>) -> Response {
    match check_readiness(&state).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(e @ ProbeError::UnexpectedFault { .. }) => {
            // Readiness never answers 500; unknown faults read as unreachable.
            warn!("Readiness probe fault: {}", e);
            ProbeError::UpstreamUnreachable {
                message: e.to_string(),
                source: Some(e.into()),
            }
            .into_response()
        }
        Err(e) => {
            warn!("Readiness probe not ready: {}", e);
            e.into_response()
        }
    }
}
