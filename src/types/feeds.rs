//! Chainlink price feed addresses (Ethereum mainnet, USD denominated)

use alloy::primitives::address;
use super::FeedDescriptor;

pub const CHAINLINK_FEEDS: &[FeedDescriptor] = &[
    FeedDescriptor {
        symbol: "ETH",
        address: address!("5f4eC3Df9cbd43714FE2740f5E3616155c5b8419"),
        decimals: 8,
    },
    FeedDescriptor {
        symbol: "BTC",
        address: address!("F4030086522a5bEEa4988F8cA5B36dbC97BeE88c"),
        decimals: 8,
    },
    FeedDescriptor {
        symbol: "USDC",
        address: address!("8fFfFfd4AfB6115b954Bd326cbe7B4BA576818f6"),
        decimals: 8,
    },
    FeedDescriptor {
        symbol: "USDT",
        address: address!("3E7d1eAB13ad0104d2750B8863b489D65364e32D"),
        decimals: 8,
    },
    FeedDescriptor {
        symbol: "DAI",
        address: address!("Aed0c38402a5d19df6E4c03F4E2DceD6e29c1ee9"),
        decimals: 8,
    },
    FeedDescriptor {
        symbol: "LINK",
        address: address!("2c1d072e956AFFC0D435Cb7AC38EF18d24d9127c"),
        decimals: 8,
    },
];

/// Case-insensitive lookup; `WETH` resolves to the ETH feed.
pub fn feed_for(symbol: &str) -> Option<&'static FeedDescriptor> {
    let wanted = match symbol.to_ascii_uppercase().as_str() {
        "WETH" => "ETH".to_string(),
        other => other.to_string(),
    };
    CHAINLINK_FEEDS.iter().find(|feed| feed.symbol == wanted)
}
