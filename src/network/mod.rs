//! Network providers and connection management

pub mod providers;

pub use providers::*;
