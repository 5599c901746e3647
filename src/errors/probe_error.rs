//! Probe error taxonomy and its HTTP mapping

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;
use crate::utils::iso_millis;

pub const RPC_NOT_READY: &str = "Ethereum provider not ready";

#[derive(Error, Debug)]
pub enum ProbeError {
    /// A file the probe depends on is absent, or holds no usable signal yet.
    #[error("{reason}")]
    MissingArtifact {
        reason: String,
        path: PathBuf,
    },

    #[error("Heartbeat is stale: last seen {uptime_seconds}s ago at {}", iso_millis(.last_heartbeat))]
    StaleSignal {
        last_heartbeat: DateTime<Utc>,
        uptime_seconds: i64,
    },

    #[error("Upstream RPC unreachable: {message}")]
    UpstreamUnreachable {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("{context}: {source}")]
    UnexpectedFault {
        context: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type ProbeResult<T> = Result<T, ProbeError>;

impl ProbeError {
    pub fn missing(reason: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::MissingArtifact {
            reason: reason.into(),
            path: path.into(),
        }
    }

    pub fn fault(context: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::UnexpectedFault {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnexpectedFault { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ProbeError {
    fn into_response(self) -> Response {
        let body = match &self {
            Self::MissingArtifact { reason, .. } => json!({
                "success": false,
                "reason": reason,
            }),
            Self::StaleSignal {
                last_heartbeat,
                uptime_seconds,
            } => json!({
                "success": false,
                "last_heartbeat": iso_millis(last_heartbeat),
                "uptime_seconds": uptime_seconds,
            }),
            // Upstream detail stays in the logs; probes only see a stable reason.
            Self::UpstreamUnreachable { .. } => json!({
                "success": false,
                "reason": RPC_NOT_READY,
            }),
            Self::UnexpectedFault { .. } => json!({
                "success": false,
                "message": self.to_string(),
            }),
        };

        (self.status(), Json(body)).into_response()
    }
}
