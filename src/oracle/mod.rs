//! On-chain price oracles

pub mod rates;

pub use rates::*;
