//! Health evaluation helpers

use chrono::{DateTime, Utc};
use crate::{
    config::LIVENESS_STALENESS_SECONDS,
    types::{HeartbeatRecord, Liveness, LivenessStatus},
    utils::whole_seconds_between,
};

/// Derive liveness from the most recent heartbeat. Live iff fewer than
/// `LIVENESS_STALENESS_SECONDS` whole seconds have passed.
pub fn evaluate_liveness(latest: Option<HeartbeatRecord>, now: DateTime<Utc>) -> LivenessStatus {
    let Some(record) = latest else {
        return LivenessStatus {
            state: Liveness::Unknown,
            last_heartbeat: None,
            uptime_seconds: None,
        };
    };

    let uptime_seconds = whole_seconds_between(now, record.timestamp);
    LivenessStatus {
        state: if uptime_seconds < LIVENESS_STALENESS_SECONDS {
            Liveness::Live
        } else {
            Liveness::Stale
        },
        last_heartbeat: Some(record.timestamp),
        uptime_seconds: Some(uptime_seconds),
    }
}

/// Seconds since the last heartbeat, or `-1` when none was ever written.
pub fn seconds_since_last(latest: Option<HeartbeatRecord>, now: DateTime<Utc>) -> i64 {
    latest
        .map(|record| whole_seconds_between(now, record.timestamp))
        .unwrap_or(-1)
}
