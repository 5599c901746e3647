//! Core data types and structures

pub mod feeds;
pub mod health;
pub mod oracle;

pub use feeds::*;
pub use health::*;
pub use oracle::*;
