//! Duration strings such as `300ms`, `-1.5h` or `2h45m`.
//!
//! Grammar: an optional sign, then one or more `<decimal><unit>` pairs, or a
//! bare `0`. Units are `ns`, `us` (`µs`, `μs`), `ms`, `s`, `m` and `h`. The
//! total must fit a signed 64-bit nanosecond count.

use std::time::Duration;

use chrono::TimeDelta;

use crate::error::{ConvertError, DurationError};

const NANOS_PER_SECOND: u64 = 1_000_000_000;

const UNITS: [(&str, u64); 8] = [
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", NANOS_PER_SECOND),
    ("m", 60 * NANOS_PER_SECOND),
    ("h", 3_600 * NANOS_PER_SECOND),
];

/// Fraction digits past this many cannot change a nanosecond result.
const MAX_FRACTION_DIGITS: usize = 18;

/// Parse a duration string into signed nanoseconds.
pub fn parse_nanos(input: &str) -> Result<i64, DurationError> {
    let invalid = || DurationError::Invalid {
        input: input.to_owned(),
    };
    let overflow = || DurationError::Overflow {
        input: input.to_owned(),
    };

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    if rest == "0" {
        return Ok(0);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        if !rest.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }

        let (whole, after) = split_digits(rest);
        rest = after;
        let (fraction, after) = match rest.strip_prefix('.') {
            Some(after_dot) => split_digits(after_dot),
            None => ("", rest),
        };
        rest = after;
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }

        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (unit, after) = rest.split_at(unit_len);
        rest = after;
        if unit.is_empty() {
            return Err(DurationError::MissingUnit {
                input: input.to_owned(),
            });
        }
        let scale = UNITS
            .iter()
            .find_map(|(name, scale)| (*name == unit).then_some(*scale))
            .ok_or_else(|| DurationError::UnknownUnit {
                unit: unit.to_owned(),
                input: input.to_owned(),
            })?;

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let nanos = whole
            .checked_mul(scale)
            .and_then(|nanos| nanos.checked_add(fraction_nanos(fraction, scale)))
            .ok_or_else(overflow)?;
        total = total.checked_add(nanos).ok_or_else(overflow)?;
    }

    if negative {
        0_i64.checked_sub_unsigned(total).ok_or_else(overflow)
    } else {
        i64::try_from(total).map_err(|_| overflow())
    }
}

/// Parse into an unsigned [`Duration`]; negative input is rejected.
pub fn parse_std(input: &str) -> Result<Duration, ConvertError> {
    let nanos = parse_nanos(input)?;
    let nanos = u64::try_from(nanos).map_err(|_| DurationError::Negative {
        input: input.to_owned(),
    })?;
    Ok(Duration::from_nanos(nanos))
}

/// Parse into a signed [`TimeDelta`].
pub fn parse_delta(input: &str) -> Result<TimeDelta, ConvertError> {
    Ok(TimeDelta::nanoseconds(parse_nanos(input)?))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Nanoseconds contributed by the digits after the decimal point.
fn fraction_nanos(digits: &str, scale: u64) -> u64 {
    let mut numerator: u128 = 0;
    let mut denominator: u128 = 1;
    for digit in digits.bytes().take(MAX_FRACTION_DIGITS) {
        numerator = numerator * 10 + u128::from(digit - b'0');
        denominator *= 10;
    }
    u64::try_from(numerator * u128::from(scale) / denominator).unwrap_or(u64::MAX)
}
