//! Shared state handed to every probe handler

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use crate::{
    config::Config,
    network::ChainClient,
    storage::{FreshnessMarker, HeartbeatLog},
};

pub type Clock = fn() -> DateTime<Utc>;

#[derive(Clone)]
pub struct AppState {
    pub heartbeat_log: HeartbeatLog,
    pub freshness: FreshnessMarker,
    pub chain: Arc<dyn ChainClient>,
    pub rpc_timeout: Duration,
    pub clock: Clock,
}

impl AppState {
    pub fn new(config: &Config, chain: Arc<dyn ChainClient>) -> Self {
        Self {
            heartbeat_log: HeartbeatLog::new(&config.heartbeat_log),
            freshness: FreshnessMarker::new(&config.routes_log),
            chain,
            rpc_timeout: config.rpc_timeout(),
            clock: Utc::now,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}
