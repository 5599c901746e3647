//! Error types for probes and price feeds

pub mod probe_error;
pub mod oracle_error;

pub use probe_error::*;
pub use oracle_error::*;
