//! Console uptime status

use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::info;
use crate::utils::format_duration;

pub fn spawn_uptime_reporter(start_time: Instant, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // First tick is immediate; nothing worth reporting yet.
        interval.tick().await;

        loop {
            interval.tick().await;
            info!(
                "[status] Server running... {} uptime",
                format_duration(start_time.elapsed().as_secs())
            );
        }
    })
}
