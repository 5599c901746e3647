//! Sidecar configuration settings and environment variable handling

use std::env;
use std::path::PathBuf;
use std::time::Duration;

// Probe policy constants
pub const HEARTBEAT_INTERVAL_SECS: u64 = 5;
pub const LIVENESS_STALENESS_SECONDS: i64 = 10; // two missed heartbeats
pub const LIVENESS_SCAN_CHUNK_BYTES: u64 = 64 * 1024;

// Readiness RPC timeout bounds
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 5;
pub const MIN_RPC_TIMEOUT_SECS: u64 = 1;
pub const MAX_RPC_TIMEOUT_SECS: u64 = 60;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
pub const DEFAULT_UPTIME_LOG_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_APP_LOG_PREFIX: &str = "sidecar";

/// How often the application log file rolls over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogRotation {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

impl LogRotation {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "minutely" => Some(Self::Minutely),
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            "never" => Some(Self::Never),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// JSON-RPC endpoint of the upstream chain.
    pub rpc_url: String,
    /// Whether `rpc_url` came from the environment or fell back to the default.
    pub rpc_url_configured: bool,
    pub port: u16,
    pub log_dir: PathBuf,
    pub heartbeat_log: PathBuf,
    /// Freshness marker written by the route logging job.
    pub routes_log: PathBuf,
    pub rpc_timeout_secs: u64,
    pub uptime_log_interval_secs: u64,
    /// File name prefix of the sidecar's own log inside `log_dir`.
    pub app_log_prefix: String,
    pub app_log_rotation: LogRotation,
    /// Write the application log file as JSON lines instead of compact text.
    pub app_log_json: bool,
}

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup, falling back to defaults
    /// for anything missing or unparseable.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let rpc_url = lookup("INFURA_URL").filter(|url| !url.trim().is_empty());
        let log_dir = lookup("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("logs"));

        Self {
            rpc_url_configured: rpc_url.is_some(),
            rpc_url: rpc_url.unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            port: lookup("PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            heartbeat_log: log_dir.join(
                lookup("HEARTBEAT_LOG_FILE").unwrap_or_else(|| "output.log".to_string()),
            ),
            routes_log: log_dir.join(
                lookup("ROUTES_LOG_FILE").unwrap_or_else(|| "swap_routes.json".to_string()),
            ),
            log_dir,
            rpc_timeout_secs: lookup("READINESS_RPC_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_RPC_TIMEOUT_SECS)
                .max(MIN_RPC_TIMEOUT_SECS)
                .min(MAX_RPC_TIMEOUT_SECS),
            uptime_log_interval_secs: lookup("UPTIME_LOG_INTERVAL_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_UPTIME_LOG_INTERVAL_SECS)
                .max(1),
            app_log_prefix: lookup("APP_LOG_PREFIX")
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_APP_LOG_PREFIX.to_string()),
            app_log_rotation: lookup("APP_LOG_ROTATION")
                .and_then(|s| LogRotation::parse(&s))
                .unwrap_or_default(),
            app_log_json: lookup("APP_LOG_FORMAT")
                .is_some_and(|f| f.trim().eq_ignore_ascii_case("json")),
        }
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(HEARTBEAT_INTERVAL_SECS)
    }

    pub fn uptime_log_interval(&self) -> Duration {
        Duration::from_secs(self.uptime_log_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = config_from(&[]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
        assert!(!config.rpc_url_configured);
        assert_eq!(config.heartbeat_log, PathBuf::from("logs/output.log"));
        assert_eq!(config.routes_log, PathBuf::from("logs/swap_routes.json"));
        assert_eq!(config.rpc_timeout(), Duration::from_secs(5));
        assert_eq!(config.heartbeat_interval(), Duration::from_secs(5));
    }

    #[test]
    fn artifact_paths_follow_log_dir() {
        let config = config_from(&[
            ("LOG_DIR", "/var/lib/sidecar"),
            ("HEARTBEAT_LOG_FILE", "hb.log"),
            ("INFURA_URL", "https://mainnet.infura.io/v3/abc"),
        ]);
        assert_eq!(config.heartbeat_log, PathBuf::from("/var/lib/sidecar/hb.log"));
        assert_eq!(
            config.routes_log,
            PathBuf::from("/var/lib/sidecar/swap_routes.json")
        );
        assert!(config.rpc_url_configured);
    }

    #[test]
    fn rpc_timeout_is_clamped() {
        assert_eq!(
            config_from(&[("READINESS_RPC_TIMEOUT_SECS", "0")]).rpc_timeout_secs,
            MIN_RPC_TIMEOUT_SECS
        );
        assert_eq!(
            config_from(&[("READINESS_RPC_TIMEOUT_SECS", "600")]).rpc_timeout_secs,
            MAX_RPC_TIMEOUT_SECS
        );
        assert_eq!(
            config_from(&[("READINESS_RPC_TIMEOUT_SECS", "soon")]).rpc_timeout_secs,
            DEFAULT_RPC_TIMEOUT_SECS
        );
    }

    #[test]
    fn app_log_settings() {
        let config = config_from(&[]);
        assert_eq!(config.app_log_prefix, DEFAULT_APP_LOG_PREFIX);
        assert_eq!(config.app_log_rotation, LogRotation::Daily);
        assert!(!config.app_log_json);

        let config = config_from(&[
            ("APP_LOG_PREFIX", "probe-sidecar"),
            ("APP_LOG_ROTATION", "Hourly"),
            ("APP_LOG_FORMAT", "JSON"),
        ]);
        assert_eq!(config.app_log_prefix, "probe-sidecar");
        assert_eq!(config.app_log_rotation, LogRotation::Hourly);
        assert!(config.app_log_json);

        let config = config_from(&[("APP_LOG_ROTATION", "weekly"), ("APP_LOG_PREFIX", " ")]);
        assert_eq!(config.app_log_rotation, LogRotation::Daily);
        assert_eq!(config.app_log_prefix, DEFAULT_APP_LOG_PREFIX);
    }

    #[test]
    fn blank_rpc_url_falls_back_to_default() {
        let config = config_from(&[("INFURA_URL", "  ")]);
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
        assert!(!config.rpc_url_configured);
    }
}
