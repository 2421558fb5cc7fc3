//! Bounded retry policy.
//!
//! One explicit policy (max attempts, backoff curve) injected into every
//! adapter, replacing per-channel ad hoc sleep loops.

use std::time::Duration;

/// Retry schedule for transport operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_backoff: Duration,
    /// Backoff multiplier between consecutive attempts.
    pub multiplier: u32,
}

impl RetryPolicy {
    /// Quick retries for sub-second UI transports.
    pub fn tight() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(500),
            multiplier: 2,
        }
    }

    /// Patient retries for asynchronous bot platforms.
    pub fn relaxed() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(2),
            multiplier: 2,
        }
    }

    /// The delays slept between attempts (one fewer than `max_attempts`).
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        let initial = self.initial_backoff;
        let multiplier = self.multiplier;
        (0..self.max_attempts.saturating_sub(1))
            .map(move |i| initial * multiplier.saturating_pow(i))
    }
}
