//! Swap Optimizer Sidecar - health probes and metrics for the route optimizer
//!
//! Writes a heartbeat log, answers liveness/readiness probes from that log and
//! an upstream chain RPC, exposes Prometheus metrics, and provides Chainlink
//! cross rates for callers that need live prices.

pub mod config;
pub mod types;
pub mod errors;
pub mod network;
pub mod oracle;
pub mod probes;
pub mod storage;
pub mod tasks;
pub mod telemetry;
pub mod utils;

// Re-export commonly used items
pub use config::{Config, CONFIG};
pub use errors::{ProbeError, ProbeResult};
pub use probes::{AppState, create_router};
pub use types::*;

// Type alias for our concrete provider
pub type ConcreteProvider = alloy::providers::RootProvider<alloy::transports::BoxTransport>;
