//! Process telemetry and Prometheus rendering

pub mod allocator;
pub mod exposition;
pub mod process;

pub use allocator::*;
pub use exposition::*;
pub use process::*;
