//! Periodic heartbeat writer

use chrono::Utc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};
use crate::storage::HeartbeatLog;

/// Append a heartbeat every `period`, starting immediately.
///
/// One task owns the log; each append finishes before the next tick is
/// awaited and late ticks are skipped, so writes never overlap. A failed
/// append is dropped for that tick.
pub fn spawn_heartbeat_writer(log: HeartbeatLog, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = log.ensure_exists().await {
            debug!("Cannot create heartbeat log {}: {}", log.path().display(), e);
        }
        info!("💓 Heartbeat writer started ({:?} period) -> {}", period, log.path().display());

        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            if let Err(e) = log.append(Utc::now()).await {
                debug!("Heartbeat write skipped: {}", e);
            }
        }
    })
}
