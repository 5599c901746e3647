//! Price feed and rate errors

use alloy::primitives::Address;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("No price feed configured for {symbol}")]
    UnknownSymbol { symbol: String },

    #[error("Price feed call failed: {symbol} at {contract}")]
    Unreachable {
        symbol: String,
        contract: Address,
        #[source]
        source: anyhow::Error,
    },

    #[error("Price feed {symbol} returned an unusable answer: {reason}")]
    Decode { symbol: String, reason: String },

    #[error("Price feed {symbol} returned a zero price")]
    ZeroPrice { symbol: String },
}

impl FeedError {
    pub fn symbol(&self) -> &str {
        match self {
            Self::UnknownSymbol { symbol }
            | Self::Unreachable { symbol, .. }
            | Self::Decode { symbol, .. }
            | Self::ZeroPrice { symbol } => symbol,
        }
    }
}

/// Failure of a two-feed rate, naming which side(s) failed.
#[derive(Error, Debug)]
pub enum RateError {
    #[error("Base feed failed: {0}")]
    Base(#[source] FeedError),

    #[error("Quote feed failed: {0}")]
    Quote(#[source] FeedError),

    #[error("Both feeds failed: {base}; {quote}")]
    Both { base: FeedError, quote: FeedError },

    #[error("Rate {from}/{to} is not representable")]
    Overflow { from: String, to: String },
}

pub type FeedResult<T> = Result<T, FeedError>;
pub type RateResult<T> = Result<T, RateError>;
