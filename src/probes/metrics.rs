//! `GET /metrics`

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::error;
use crate::{
    telemetry::{MetricsSnapshot, render_error, render_metrics, sample_process},
    utils::seconds_since_last,
};
use super::AppState;

pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

pub async fn collect_metrics(state: &AppState) -> Result<MetricsSnapshot> {
    let summary = state.heartbeat_log.summarize().await?;
    let process = tokio::task::spawn_blocking(sample_process)
        .await
        .context("Process sampling task failed")?;

    Ok(MetricsSnapshot {
        heartbeat_count: summary.count,
        seconds_since_last: seconds_since_last(summary.last, state.now()),
        process,
    })
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    match collect_metrics(&state).await {
        Ok(snapshot) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, TEXT_PLAIN)],
            render_metrics(&snapshot),
        )
            .into_response(),
        Err(e) => {
            error!("Metrics collection failed: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, TEXT_PLAIN)],
                render_error(&format!("{:#}", e)),
            )
                .into_response()
        }
    }
}
