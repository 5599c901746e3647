//! End-to-end probe behaviour through the HTTP router

use alloy::primitives::{Address, Bytes};
use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use swap_optimizer_sidecar::{AppState, Config, create_router, network::ChainClient};
use tempfile::TempDir;
use tower::ServiceExt;

enum Upstream {
    Reachable,
    Down,
    Hung,
}

struct FakeChain(Upstream);

#[async_trait]
impl ChainClient for FakeChain {
    async fn block_number(&self) -> anyhow::Result<u64> {
        match self.0 {
            Upstream::Reachable => Ok(19_000_000),
            Upstream::Down => anyhow::bail!("connection refused"),
            Upstream::Hung => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(19_000_000)
            }
        }
    }

    async fn call_view(&self, _contract: Address, _signature: &str) -> anyhow::Result<Bytes> {
        anyhow::bail!("not used by probes")
    }
}

/// 15 seconds after the `[heartbeat] 2024-01-01T00:00:00.000Z` fixture.
fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 15).unwrap()
}

struct TestApp {
    _dir: TempDir,
    heartbeat_log: PathBuf,
    routes_log: PathBuf,
    app: Router,
}

impl TestApp {
    fn new(upstream: Upstream) -> Self {
        let dir = TempDir::new().unwrap();
        let log_dir = dir.path().to_string_lossy().to_string();
        let config = Config::from_lookup(|key| match key {
            "LOG_DIR" => Some(log_dir.clone()),
            "READINESS_RPC_TIMEOUT_SECS" => Some("2".to_string()),
            _ => None,
        });

        let state = AppState::new(&config, Arc::new(FakeChain(upstream))).with_clock(fixed_now);
        Self {
            heartbeat_log: config.heartbeat_log.clone(),
            routes_log: config.routes_log.clone(),
            app: create_router(state),
            _dir: dir,
        }
    }

    fn write_log(&self, contents: impl AsRef<[u8]>) {
        std::fs::write(&self.heartbeat_log, contents).unwrap();
    }

    fn touch_routes_log(&self) {
        std::fs::write(&self.routes_log, "[]").unwrap();
    }

    async fn get(&self, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = self
            .app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, _, body) = self.get(uri).await;
        (status, serde_json::from_str(&body).unwrap())
    }
}

#[tokio::test]
async fn healthz_reports_stale_heartbeat() {
    let app = TestApp::new(Upstream::Reachable);
    app.write_log("[heartbeat] 2024-01-01T00:00:00.000Z\n");

    let (status, body) = app.get_json("/healthz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
    assert_eq!(body["uptime_seconds"], 15);
    assert_eq!(body["last_heartbeat"], "2024-01-01T00:00:00.000Z");
}

#[tokio::test]
async fn healthz_reports_live_heartbeat() {
    let app = TestApp::new(Upstream::Reachable);
    app.write_log(
        "[heartbeat] 2024-01-01T00:00:00.000Z\n\
         [heartbeat] 2024-01-01T00:00:10.000Z\n\
         Server listening on port 3000\n",
    );

    let (status, body) = app.get_json("/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["uptime_seconds"], 5);
    assert_eq!(body["last_heartbeat"], "2024-01-01T00:00:10.000Z");
}

#[tokio::test]
async fn healthz_treats_exactly_ten_seconds_as_stale() {
    let app = TestApp::new(Upstream::Reachable);
    app.write_log("[heartbeat] 2024-01-01T00:00:05.000Z\n");

    let (status, body) = app.get_json("/healthz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["uptime_seconds"], 10);
}

#[tokio::test]
async fn healthz_without_log_is_unavailable() {
    let app = TestApp::new(Upstream::Reachable);

    let (status, body) = app.get_json("/healthz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
    assert_eq!(body["reason"], "Heartbeat log not found");
}

#[tokio::test]
async fn healthz_with_empty_log_is_unavailable() {
    let app = TestApp::new(Upstream::Reachable);
    app.write_log("");

    let (status, body) = app.get_json("/healthz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["reason"], "No heartbeat found");
}

#[tokio::test]
async fn healthz_parse_fault_is_server_error() {
    let app = TestApp::new(Upstream::Reachable);
    app.write_log("[heartbeat] sometime on tuesday\n");

    let (status, body) = app.get_json("/healthz").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("invalid heartbeat timestamp"));
}

#[tokio::test]
async fn readyz_ready_when_rpc_and_routes_log_ok() {
    let app = TestApp::new(Upstream::Reachable);
    app.touch_routes_log();

    let (status, body) = app.get_json("/readyz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "success": true }));
}

#[tokio::test]
async fn readyz_reports_missing_routes_log() {
    let app = TestApp::new(Upstream::Reachable);

    let (status, body) = app.get_json("/readyz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
    assert_eq!(body["reason"], "Swap routes log not ready");
}

#[tokio::test]
async fn readyz_reports_unreachable_rpc() {
    let app = TestApp::new(Upstream::Down);
    app.touch_routes_log();

    let (status, body) = app.get_json("/readyz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["reason"], "Ethereum provider not ready");
}

#[tokio::test]
async fn readyz_checks_rpc_before_routes_log() {
    let app = TestApp::new(Upstream::Down);

    let (_, body) = app.get_json("/readyz").await;
    assert_eq!(body["reason"], "Ethereum provider not ready");
}

#[tokio::test(start_paused = true)]
async fn readyz_times_out_hung_rpc() {
    let app = TestApp::new(Upstream::Hung);
    app.touch_routes_log();

    let (status, body) = app.get_json("/readyz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["reason"], "Ethereum provider not ready");
}

#[tokio::test]
async fn metrics_without_log_reports_zero_and_sentinel() {
    let app = TestApp::new(Upstream::Reachable);

    let (status, content_type, body) = app.get("/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/plain"));
    assert!(body.contains("swap_optimizer_heartbeat_count 0\n"));
    assert!(body.contains("swap_optimizer_last_heartbeat_seconds -1\n"));
    assert!(body.contains("# TYPE swap_optimizer_memory_rss_bytes gauge\n"));
    assert!(body.contains("# TYPE swap_optimizer_cpu_system_usec counter\n"));
}

#[tokio::test]
async fn metrics_count_only_heartbeat_lines() {
    let app = TestApp::new(Upstream::Reachable);
    app.write_log(
        "[heartbeat] 2024-01-01T00:00:00.000Z\n\
         Connected to Ethereum. Latest block: 19000000\n\
         [heartbeat] 2024-01-01T00:00:05.000Z\n\
         \n",
    );

    let (status, _, body) = app.get("/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("swap_optimizer_heartbeat_count 2\n"));
    assert!(body.contains("swap_optimizer_last_heartbeat_seconds 10\n"));
}

#[tokio::test]
async fn metrics_and_healthz_agree_on_non_utf8_log() {
    let app = TestApp::new(Upstream::Reachable);
    app.write_log(
        b"[heartbeat] 2024-01-01T00:00:00.000Z\n\
          route dump \xff\xfe garbage\n\
          [heartbeat] 2024-01-01T00:00:05.000Z\n"
            .as_slice(),
    );

    let (status, _, body) = app.get("/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("swap_optimizer_heartbeat_count 2\n"));
    assert!(body.contains("swap_optimizer_last_heartbeat_seconds 10\n"));

    let (status, body) = app.get_json("/healthz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["uptime_seconds"], 10);
    assert_eq!(body["last_heartbeat"], "2024-01-01T00:00:05.000Z");
}

#[tokio::test]
async fn metrics_parse_fault_is_a_comment() {
    let app = TestApp::new(Upstream::Reachable);
    app.write_log("[heartbeat] 2024-01-01T00:00:00.000Z\n[heartbeat] ???\n");

    let (status, _, body) = app.get("/metrics").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.starts_with("# ERROR reading logs: "));
    assert_eq!(body.lines().count(), 1);
}
