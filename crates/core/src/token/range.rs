//! Bound pairs such as `5-10`, `20:10` or `1..255`.

use std::str::FromStr;

use super::error::TokenError;

/// Characters accepted between the two bounds. `..` is covered by `.`
/// because empty segments are discarded.
const DELIMITERS: [char; 4] = [':', '-', ',', '.'];

const CANONICAL_DELIMITER: char = ':';

/// Splits a bound pair into its two textual halves.
///
/// Every delimiter is normalised to one separator before splitting and empty
/// segments are dropped, so `"5-10"`, `"5:10"`, `"5,10"`, `"5.10"` and
/// `"5..10"` all yield `("5", "10")`.
pub fn split_bounds(raw: &str) -> Result<(String, String), TokenError> {
    let normalized: String = raw
        .trim()
        .chars()
        .map(|c| {
            if DELIMITERS.contains(&c) {
                CANONICAL_DELIMITER
            } else {
                c
            }
        })
        .collect();

    let segments: Vec<&str> = normalized
        .split(CANONICAL_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    match segments.as_slice() {
        [low, high] => Ok((low.to_string(), high.to_string())),
        _ => Err(TokenError::BoundCount {
            raw: raw.to_string(),
            found: segments.len(),
        }),
    }
}

/// Parses a bound pair into a numeric domain.
///
/// # Examples
///
/// ```
/// use recordgen_core::token::parse_range;
///
/// assert_eq!(parse_range::<u64>("5-10").unwrap(), (5, 10));
/// assert_eq!(parse_range::<u64>("20:10").unwrap(), (20, 10));
/// assert!(parse_range::<u64>("5").is_err());
/// ```
pub fn parse_range<T: FromStr>(raw: &str) -> Result<(T, T), TokenError> {
    let (low, high) = split_bounds(raw)?;
    Ok((parse_bound(raw, &low)?, parse_bound(raw, &high)?))
}

fn parse_bound<T: FromStr>(raw: &str, bound: &str) -> Result<T, TokenError> {
    bound.parse().map_err(|_| TokenError::InvalidBound {
        raw: raw.to_string(),
        bound: bound.to_string(),
    })
}
