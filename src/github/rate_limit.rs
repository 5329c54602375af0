//! Rate limit details reported by the GitHub API.
//!
//! Anonymous callers get a small hourly quota, so a `RateLimited` failure is
//! the error users hit most often. The `X-RateLimit-*` headers on the
//! rejected response tell them when the window reopens.

use std::time::{SystemTime, UNIX_EPOCH};

use http::HeaderMap;

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RESET_HEADER: &str = "x-ratelimit-reset";

/// Rate limit window extracted from GitHub API response headers.
///
/// # Example
///
/// ```
/// use orgview::github::rate_limit::RateLimitInfo;
///
/// let info = RateLimitInfo::new(60, 0, 1_700_000_000);
/// assert!(info.is_exhausted());
/// assert_eq!(info.limit(), 60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    limit: u32,
    remaining: u32,
    reset_at: u64,
}

impl RateLimitInfo {
    /// Creates a rate limit window.
    #[must_use]
    pub const fn new(limit: u32, remaining: u32, reset_at: u64) -> Self {
        Self {
            limit,
            remaining,
            reset_at,
        }
    }

    /// Reads the `X-RateLimit-*` headers of a response.
    ///
    /// Returns `None` unless all three headers are present and numeric.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let limit = header_number(headers, LIMIT_HEADER)?;
        let remaining = header_number(headers, REMAINING_HEADER)?;
        let reset_at = header_number(headers, RESET_HEADER)?;
        Some(Self::new(limit, remaining, reset_at))
    }

    /// Maximum requests allowed in the current window.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Requests left in the current window.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Unix timestamp at which the window resets.
    #[must_use]
    pub const fn reset_at(&self) -> u64 {
        self.reset_at
    }

    /// Returns true when no requests remain in the window.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Seconds until the window resets.
    ///
    /// Returns 0 if the reset time has passed or the clock is unavailable.
    #[must_use]
    pub fn seconds_until_reset(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_secs())
            .unwrap_or(0);

        self.reset_at.saturating_sub(now)
    }
}

fn header_number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use http::{HeaderMap, HeaderValue};
    use rstest::rstest;

    use super::RateLimitInfo;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn from_headers_reads_the_full_window() {
        let map = headers(&[
            ("x-ratelimit-limit", "60"),
            ("x-ratelimit-remaining", "0"),
            ("x-ratelimit-reset", "1700000000"),
        ]);

        let info = RateLimitInfo::from_headers(&map).expect("headers should parse");

        assert_eq!(info, RateLimitInfo::new(60, 0, 1_700_000_000));
        assert!(info.is_exhausted());
    }

    #[rstest]
    #[case::missing_reset(&[("x-ratelimit-limit", "60"), ("x-ratelimit-remaining", "0")])]
    #[case::non_numeric(&[
        ("x-ratelimit-limit", "sixty"),
        ("x-ratelimit-remaining", "0"),
        ("x-ratelimit-reset", "1700000000"),
    ])]
    #[case::empty(&[])]
    fn from_headers_requires_every_numeric_header(#[case] pairs: &[(&'static str, &'static str)]) {
        assert!(RateLimitInfo::from_headers(&headers(pairs)).is_none());
    }

    #[test]
    fn seconds_until_reset_is_zero_once_the_window_has_passed() {
        let info = RateLimitInfo::new(60, 0, 0);
        assert_eq!(info.seconds_until_reset(), 0);
    }

    #[test]
    fn seconds_until_reset_counts_down_to_a_future_reset() {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be available")
            .as_secs();
        let info = RateLimitInfo::new(60, 0, now + 90);

        let seconds = info.seconds_until_reset();
        assert!(
            (1..=90).contains(&seconds),
            "expected 1..=90 seconds until reset, got {seconds}"
        );
    }
}
