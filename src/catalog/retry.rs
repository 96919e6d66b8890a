//! Retry classification and backoff for single page fetches.
//!
//! Each page fetch owns its own `RetryState`; nothing is shared between
//! concurrent scans.

use crate::config::RetryConfig;
use crate::error::PricingError;
use std::time::Duration;

/// Outcome of one failed page request.
#[derive(Debug)]
pub enum Failure {
    /// Network error, timeout or 5xx; retried with exponential backoff
    Transient(String),
    /// HTTP 429, optionally carrying the server's retry hint
    RateLimited { retry_after: Option<Duration> },
    /// Not retried
    Fatal(PricingError),
}

/// Bounds and delays for retrying a page request.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_transient_retries: u32,
    pub max_rate_limit_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_transient_retries: config.max_transient_retries,
            max_rate_limit_retries: config.max_rate_limit_retries,
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
        }
    }

    /// Exponential delay for the given zero-based retry, capped at `max_delay`.
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.min(16));
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Delay before retrying a 429: the server hint when present, otherwise backoff.
    pub fn rate_limit_delay(&self, retry: u32, retry_after: Option<Duration>) -> Duration {
        match retry_after {
            Some(hint) => hint.min(self.max_delay),
            None => self.backoff(retry),
        }
    }
}

/// Retry bookkeeping for one page request.
#[derive(Debug, Default)]
pub struct RetryState {
    transient: u32,
    rate_limited: u32,
}

impl RetryState {
    /// Total requests issued so far, counting the one that just failed.
    pub fn attempts(&self) -> u32 {
        self.transient + self.rate_limited + 1
    }

    /// Records a failure and returns how long to wait before the next attempt.
    ///
    /// Returns the terminal error once the failure is fatal or its bound is exhausted.
    pub fn next_delay(
        &mut self,
        policy: &RetryPolicy,
        failure: Failure,
    ) -> Result<Duration, PricingError> {
        match failure {
            Failure::Fatal(err) => Err(err),
            Failure::Transient(message) => {
                if self.transient >= policy.max_transient_retries {
                    return Err(PricingError::unavailable(self.attempts(), message));
                }
                let delay = policy.backoff(self.transient);
                self.transient += 1;
                Ok(delay)
            }
            Failure::RateLimited { retry_after } => {
                if self.rate_limited >= policy.max_rate_limit_retries {
                    return Err(PricingError::RateLimited {
                        attempts: self.attempts(),
                    });
                }
                let delay = policy.rate_limit_delay(self.rate_limited, retry_after);
                self.rate_limited += 1;
                Ok(delay)
            }
        }
    }
}

/// Parses a `Retry-After` header given in delta-seconds.
///
/// HTTP-date values are not supported and yield `None`.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy {
            max_transient_retries: 2,
            max_rate_limit_retries: 3,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(1_000),
        }
    }

    mod backoff {
        use super::*;

        #[test]
        fn test_doubles_per_retry() {
            let policy = policy();
            assert_eq!(policy.backoff(0), Duration::from_millis(100));
            assert_eq!(policy.backoff(1), Duration::from_millis(200));
            assert_eq!(policy.backoff(2), Duration::from_millis(400));
        }

        #[test]
        fn test_is_capped() {
            let policy = policy();
            assert_eq!(policy.backoff(4), Duration::from_millis(1_000));
            assert_eq!(policy.backoff(u32::MAX), Duration::from_millis(1_000));
        }

        #[test]
        fn test_rate_limit_prefers_hint() {
            let policy = policy();
            assert_eq!(
                policy.rate_limit_delay(0, Some(Duration::from_millis(300))),
                Duration::from_millis(300)
            );
            assert_eq!(
                policy.rate_limit_delay(0, Some(Duration::from_secs(120))),
                Duration::from_millis(1_000)
            );
            assert_eq!(policy.rate_limit_delay(1, None), Duration::from_millis(200));
        }
    }

    mod retry_state {
        use super::*;

        #[test]
        fn test_transient_bound() {
            let policy = policy();
            let mut state = RetryState::default();

            assert!(state
                .next_delay(&policy, Failure::Transient("503".into()))
                .is_ok());
            assert!(state
                .next_delay(&policy, Failure::Transient("503".into()))
                .is_ok());
            let err = state
                .next_delay(&policy, Failure::Transient("503".into()))
                .unwrap_err();

            assert!(matches!(
                err,
                PricingError::UpstreamUnavailable { attempts: 3, .. }
            ));
        }

        #[test]
        fn test_rate_limit_bound() {
            let policy = policy();
            let mut state = RetryState::default();

            for _ in 0..3 {
                assert!(state
                    .next_delay(&policy, Failure::RateLimited { retry_after: None })
                    .is_ok());
            }
            let err = state
                .next_delay(&policy, Failure::RateLimited { retry_after: None })
                .unwrap_err();

            assert!(matches!(err, PricingError::RateLimited { attempts: 4 }));
        }

        #[test]
        fn test_bounds_are_counted_separately() {
            let policy = policy();
            let mut state = RetryState::default();

            state
                .next_delay(&policy, Failure::Transient("timeout".into()))
                .unwrap();
            state
                .next_delay(&policy, Failure::Transient("timeout".into()))
                .unwrap();
            // transient budget spent, rate limit budget untouched
            assert!(state
                .next_delay(&policy, Failure::RateLimited { retry_after: None })
                .is_ok());
        }

        #[test]
        fn test_fatal_is_not_retried() {
            let policy = policy();
            let mut state = RetryState::default();
            let err = state
                .next_delay(
                    &policy,
                    Failure::Fatal(PricingError::upstream_request(
                        reqwest::StatusCode::NOT_FOUND,
                        "missing".to_string(),
                    )),
                )
                .unwrap_err();
            assert!(matches!(
                err,
                PricingError::UpstreamRequest { status: 404, .. }
            ));
        }
    }

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after("5"), Some(Duration::from_secs(5)));
        assert_eq!(parse_retry_after(" 0 "), Some(Duration::ZERO));
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
    }
}
