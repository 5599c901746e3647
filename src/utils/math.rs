//! Mathematical utility functions

use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

/// `10^n` as a decimal, or `None` once it leaves the representable range.
pub fn pow10(n: u32) -> Option<Decimal> {
    match n {
        0 => Some(dec!(1)),
        8 => Some(dec!(100_000_000)),
        18 => Some(dec!(1_000_000_000_000_000_000)),
        _ => {
            let mut result = dec!(1);
            for _ in 0..n {
                result = result.checked_mul(dec!(10))?;
            }
            Some(result)
        }
    }
}

/// Scale an integer oracle answer (given in its decimal string form) down by
/// `10^decimals`.
pub fn scale_integer(raw: &str, decimals: u32) -> Option<Decimal> {
    let value = Decimal::from_str(raw).ok()?;
    value.checked_div(pow10(decimals)?)
}

/// Whole seconds from `earlier` to `later`, floored.
pub fn whole_seconds_between(later: DateTime<Utc>, earlier: DateTime<Utc>) -> i64 {
    (later - earlier).num_milliseconds().div_euclid(1000)
}
