//! `GET /healthz`

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, warn};
use crate::{
    errors::{ProbeError, ProbeResult},
    types::{Liveness, LivenessStatus},
    utils::{evaluate_liveness, iso_millis},
};
use super::AppState;

#[derive(Debug, Serialize)]
pub struct LivenessBody {
    pub success: bool,
    pub last_heartbeat: String,
    pub uptime_seconds: i64,
}

/// Live status, or the reason the process cannot be considered live.
pub async fn check_liveness(state: &AppState) -> ProbeResult<LivenessStatus> {
    let latest = state.heartbeat_log.latest().await?;
    let status = evaluate_liveness(latest, state.now());

    match (status.state, status.last_heartbeat, status.uptime_seconds) {
        (Liveness::Live, Some(_), Some(_)) => Ok(status),
        (Liveness::Stale, Some(last_heartbeat), Some(uptime_seconds)) => {
            Err(ProbeError::StaleSignal {
                last_heartbeat,
                uptime_seconds,
            })
        }
        _ => Err(ProbeError::missing(
            "No heartbeat found",
            state.heartbeat_log.path(),
        )),
    }
}

pub async fn healthz(State(state): State<AppState>) -> Response {
    match check_liveness(&state).await {
        Ok(LivenessStatus {
            last_heartbeat: Some(last_heartbeat),
            uptime_seconds: Some(uptime_seconds),
            ..
        }) => (
            StatusCode::OK,
            Json(LivenessBody {
                success: true,
                last_heartbeat: iso_millis(&last_heartbeat),
                uptime_seconds,
            }),
        )
            .into_response(),
        Ok(status) => {
            error!("Live status without a heartbeat: {:?}", status);
            ProbeError::missing("No heartbeat found", state.heartbeat_log.path()).into_response()
        }
        Err(e) => {
            match &e {
                ProbeError::UnexpectedFault { .. } => error!("Liveness probe failed: {}", e),
                _ => warn!("Liveness probe not live: {}", e),
            }
            e.into_response()
        }
    }
}
