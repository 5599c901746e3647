//! Health monitoring types

use chrono::{DateTime, Utc};

/// One `[heartbeat] <timestamp>` line of the heartbeat log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatRecord {
    pub timestamp: DateTime<Utc>,
}

/// Whole-log view used by the metrics endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeartbeatSummary {
    pub count: u64,
    pub last: Option<HeartbeatRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Live,
    Stale,
    /// No heartbeat has been observed yet.
    Unknown,
}

#[derive(Debug, Clone)]
pub struct LivenessStatus {
    pub state: Liveness,
    pub last_heartbeat: Option<DateTime<Utc>>,
    pub uptime_seconds: Option<i64>,
}

impl LivenessStatus {
    pub fn is_live(&self) -> bool {
        self.state == Liveness::Live
    }
}
