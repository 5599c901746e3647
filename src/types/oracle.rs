//! Price oracle types

use alloy::primitives::{Address, I256};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedDescriptor {
    pub symbol: &'static str,
    pub address: Address,
    pub decimals: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedQuote {
    pub symbol: String,
    pub contract_address: Address,
    pub decimals: u32,
    #[serde(skip)]
    pub raw_answer: I256,
    pub price: Decimal,
}

/// `quote.price / base.price`, i.e. how many `base` units one `quote` buys
/// (ETH base at 2000, USDC quote at 1: 0.0005).
#[derive(Debug, Clone, Serialize)]
pub struct RateQuote {
    pub base: FeedQuote,
    pub quote: FeedQuote,
    pub rate: Decimal,
}

impl RateQuote {
    pub fn as_f64(&self) -> Option<f64> {
        self.rate.to_f64()
    }
}
