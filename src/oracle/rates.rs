//! Live prices from Chainlink feeds and cross rates between them

use alloy::{
    primitives::{I256, U256},
    sol_types::SolValue,
};
use rust_decimal::Decimal;
use tracing::{debug, warn};
use crate::{
    errors::{FeedError, FeedResult, RateError, RateResult},
    network::ChainClient,
    types::{FeedQuote, RateQuote, feed_for},
    utils::scale_integer,
};

pub const LATEST_ANSWER: &str = "latestAnswer()";

/// Query one feed's `latestAnswer()` and scale it by its decimals.
pub async fn get_live_price(client: &dyn ChainClient, symbol: &str) -> FeedResult<FeedQuote> {
    let feed = feed_for(symbol).ok_or_else(|| FeedError::UnknownSymbol {
        symbol: symbol.to_string(),
    })?;

    let data = client
        .call_view(feed.address, LATEST_ANSWER)
        .await
        .map_err(|e| FeedError::Unreachable {
            symbol: feed.symbol.to_string(),
            contract: feed.address,
            source: e,
        })?;

    let raw_answer = U256::abi_decode(&data, true)
        .map(I256::from_raw)
        .map_err(|e| FeedError::Decode {
            symbol: feed.symbol.to_string(),
            reason: e.to_string(),
        })?;

    let price = scale_integer(&raw_answer.to_string(), feed.decimals).ok_or_else(|| {
        FeedError::Decode {
            symbol: feed.symbol.to_string(),
            reason: format!("answer {} does not fit a decimal", raw_answer),
        }
    })?;

    // Negative answers are passed through; only zero counts as no price.
    if price.is_zero() {
        return Err(FeedError::ZeroPrice {
            symbol: feed.symbol.to_string(),
        });
    }

    debug!(symbol = feed.symbol, %price, "Fetched live price");

    Ok(FeedQuote {
        symbol: feed.symbol.to_string(),
        contract_address: feed.address,
        decimals: feed.decimals,
        raw_answer,
        price,
    })
}

/// Two-of-two: succeed only when both sides did, otherwise say which failed.
pub fn both<A, B>(base: FeedResult<A>, quote: FeedResult<B>) -> RateResult<(A, B)> {
    match (base, quote) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (Err(base), Ok(_)) => Err(RateError::Base(base)),
        (Ok(_), Err(quote)) => Err(RateError::Quote(quote)),
        (Err(base), Err(quote)) => Err(RateError::Both { base, quote }),
    }
}

/// `price(to) / price(from)` from two fresh feed reads, queried concurrently.
pub async fn fetch_rate(client: &dyn ChainClient, from: &str, to: &str) -> RateResult<RateQuote> {
    let (base, quote) = tokio::join!(get_live_price(client, from), get_live_price(client, to));
    let (base, quote) = both(base, quote)?;

    let rate = quote
        .price
        .checked_div(base.price)
        .ok_or_else(|| RateError::Overflow {
            from: from.to_string(),
            to: to.to_string(),
        })?;

    Ok(RateQuote { base, quote, rate })
}

/// All-or-nothing form of [`fetch_rate`]: `None` if either feed failed.
pub async fn get_live_rate(client: &dyn ChainClient, from: &str, to: &str) -> Option<Decimal> {
    match fetch_rate(client, from, to).await {
        Ok(quote) => Some(quote.rate),
        Err(e) => {
            warn!("Live rate {}/{} unavailable: {}", from, to, e);
            None
        }
    }
}
