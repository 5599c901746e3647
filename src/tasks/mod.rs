//! Background tasks scheduled alongside the HTTP server

pub mod heartbeat;
pub mod uptime;

pub use heartbeat::*;
pub use uptime::*;
