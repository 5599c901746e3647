//! Data persistence and file operations

pub mod heartbeat_log;
pub mod freshness;

pub use heartbeat_log::*;
pub use freshness::*;
