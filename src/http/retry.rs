//! Retry policy with exponential backoff and jitter

use rand::Rng;
use reqwest::Response;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Decides how many times a request is retried and how long to wait
/// between attempts.
///
/// The delay before retry `n` (counted from 0) is
/// `backoff_factor * 2^n + uniform(0, max_jitter)`, capped at `max_backoff`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Number of retries after the first attempt
    pub n_retries: u32,
    /// Base delay in seconds, doubled on every retry
    pub backoff_factor: f64,
    /// Upper bound of the random jitter in seconds
    pub max_jitter: f64,
    /// Upper bound of a single delay
    #[serde(with = "duration_secs")]
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            n_retries: 3,
            backoff_factor: 1.0,
            max_jitter: 1.0,
            max_backoff: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Create a policy
    pub fn new(n_retries: u32, backoff_factor: f64, max_jitter: f64) -> Self {
        Self {
            n_retries,
            backoff_factor,
            max_jitter,
            ..Self::default()
        }
    }

    /// A policy that never retries
    pub fn none() -> Self {
        Self::new(0, 0.0, 0.0)
    }

    /// Whether another attempt is allowed after `attempt` retries
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.n_retries
    }

    /// Delay before retry number `attempt` without the jitter component
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let exp = 2f64.powi(attempt.min(30) as i32);
        let secs = (self.backoff_factor.max(0.0) * exp).min(self.max_backoff.as_secs_f64());
        Duration::from_secs_f64(secs)
    }

    /// Delay before retry number `attempt`, jitter included
    pub fn delay(&self, attempt: u32) -> Duration {
        // Never jitter past the cap; `min` also maps NaN and infinity to it
        let max_jitter = self.max_jitter.min(self.max_backoff.as_secs_f64());
        let jitter = if max_jitter > 0.0 {
            rand::thread_rng().gen_range(0.0..=max_jitter)
        } else {
            0.0
        };
        let total = self
            .base_delay(attempt)
            .saturating_add(Duration::from_secs_f64(jitter));
        total.min(self.max_backoff)
    }

    /// Delay for a throttled (429) response: honours `Retry-After` when the
    /// server sends one
    pub fn throttle_delay(&self, attempt: u32, retry_after: Option<u64>) -> Duration {
        match retry_after {
            Some(secs) => Duration::from_secs(secs).min(self.max_backoff),
            None => self.delay(attempt),
        }
    }
}

/// Extract the `Retry-After` header value in seconds
pub(crate) fn extract_retry_after(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod retry_tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.n_retries, 3);
        assert!((policy.backoff_factor - 1.0).abs() < f64::EPSILON);
        assert!((policy.max_jitter - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_base_delay_doubles() {
        let policy = RetryPolicy::new(5, 0.5, 0.0);
        assert_eq!(policy.base_delay(0), Duration::from_millis(500));
        assert_eq!(policy.base_delay(1), Duration::from_secs(1));
        assert_eq!(policy.base_delay(2), Duration::from_secs(2));
        assert_eq!(policy.base_delay(3), Duration::from_secs(4));
    }

    #[test]
    fn test_delay_capped() {
        let mut policy = RetryPolicy::new(50, 1.0, 0.0);
        policy.max_backoff = Duration::from_secs(10);
        assert_eq!(policy.delay(20), Duration::from_secs(10));
    }

    #[test]
    fn test_jitter_within_bounds() {
        let policy = RetryPolicy::new(3, 0.1, 0.2);
        for _ in 0..50 {
            let delay = policy.delay(0);
            assert!(delay >= Duration::from_millis(100));
            assert!(delay <= Duration::from_millis(300));
        }
    }

    #[test]
    fn test_unbounded_jitter_stays_under_cap() {
        for max_jitter in [f64::INFINITY, f64::NAN, 1e300] {
            let mut policy = RetryPolicy::new(3, 0.0, max_jitter);
            policy.max_backoff = Duration::from_secs(2);
            assert!(policy.delay(0) <= Duration::from_secs(2));
        }
    }

    #[test]
    fn test_should_retry() {
        let policy = RetryPolicy::new(2, 0.0, 0.0);
        assert!(policy.should_retry(0));
        assert!(policy.should_retry(1));
        assert!(!policy.should_retry(2));
        assert!(!RetryPolicy::none().should_retry(0));
    }

    #[test]
    fn test_throttle_delay_prefers_retry_after() {
        let policy = RetryPolicy::new(3, 5.0, 0.0);
        assert_eq!(policy.throttle_delay(0, Some(2)), Duration::from_secs(2));
        assert_eq!(policy.throttle_delay(0, None), Duration::from_secs(5));
    }

    #[test]
    fn test_policy_from_yaml() {
        let policy: RetryPolicy =
            serde_yaml::from_str("n_retries: 5\nbackoff_factor: 0.25\nmax_backoff: 2.5\n")
                .unwrap();
        assert_eq!(policy.n_retries, 5);
        assert!((policy.backoff_factor - 0.25).abs() < f64::EPSILON);
        assert!((policy.max_jitter - 1.0).abs() < f64::EPSILON);
        assert_eq!(policy.max_backoff, Duration::from_millis(2500));
    }
}
