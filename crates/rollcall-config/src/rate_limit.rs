//! Rate limiting configuration for API endpoints.
//!
//! Requests are limited per client with a token bucket from the Governor
//! crate:
//!
//! - Tokens are added at the configured rate (per second)
//! - Each request consumes one token
//! - Burst size defines the maximum tokens that can accumulate
//! - Requests are rejected with `429 Too Many Requests` when the bucket is empty
//!
//! # Configuration
//!
//! - `RATE_LIMIT_ENABLED`: Set to `false` to disable limiting (default: true)
//! - `RATE_LIMIT_PER_SECOND`: Token replenishment rate (default: 10)
//! - `RATE_LIMIT_BURST_SIZE`: Bucket capacity (default: 50)
//! - `RATE_LIMIT_TRUST_PROXY`: Key clients on the first `x-forwarded-for`
//!   entry instead of the peer address. Only enable behind a reverse proxy
//!   that overwrites the header (default: false)
//!
//! # Example
//!
//! ```ignore
//! use rollcall_config::RateLimitConfig;
//! use governor::RateLimiter;
//!
//! let config = RateLimitConfig::from_env();
//! let limiter = RateLimiter::keyed(config.quota());
//! ```

use std::num::NonZeroU32;

use governor::Quota;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,

    /// Requests per second.
    ///
    /// This is the rate at which tokens are replenished in the bucket.
    pub per_second: u32,

    /// Maximum number of tokens that can accumulate, allowing short bursts of
    /// traffic above the per-second rate.
    pub burst_size: u32,

    /// Take the client address from `x-forwarded-for`.
    pub trust_proxy: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            per_second: 10,
            burst_size: 50,
            trust_proxy: false,
        }
    }
}

impl RateLimitConfig {
    /// Creates a new `RateLimitConfig` from environment variables.
    ///
    /// Falls back to default values if environment variables are not set
    /// or cannot be parsed.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: std::env::var("RATE_LIMIT_ENABLED")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.enabled),
            per_second: std::env::var("RATE_LIMIT_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.per_second),
            burst_size: std::env::var("RATE_LIMIT_BURST_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.burst_size),
            trust_proxy: std::env::var("RATE_LIMIT_TRUST_PROXY")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(defaults.trust_proxy),
        }
    }

    /// Builds the Governor quota. Zero values are raised to one.
    #[must_use]
    pub fn quota(&self) -> Quota {
        let per_second = NonZeroU32::new(self.per_second).unwrap_or(NonZeroU32::MIN);
        let burst_size = NonZeroU32::new(self.burst_size).unwrap_or(NonZeroU32::MIN);

        Quota::per_second(per_second).allow_burst(burst_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.per_second, 10);
        assert_eq!(config.burst_size, 50);
        assert!(!config.trust_proxy);
    }

    #[test]
    fn test_quota_uses_burst_size() {
        let config = RateLimitConfig {
            enabled: true,
            per_second: 5,
            burst_size: 20,
            trust_proxy: false,
        };
        assert_eq!(config.quota().burst_size().get(), 20);
    }

    #[test]
    fn test_quota_raises_zero_values() {
        let config = RateLimitConfig {
            enabled: true,
            per_second: 0,
            burst_size: 0,
            ..RateLimitConfig::default()
        };
        assert_eq!(config.quota().burst_size().get(), 1);
    }
}
