//! Reply wait policy value objects.

use std::time::Duration;

/// Logical timeout budget handed to a channel adapter when awaiting a reply.
///
/// The orchestrator only supplies this budget; the adapter owns its own
/// transport-specific retry strategy within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    /// Grace period before the first poll, for channels that deliver
    /// asynchronously.
    pub initial_delay: Duration,
    /// Interval between reply polls.
    pub poll_interval: Duration,
    /// Total wall-clock budget; once exhausted the exchange records the
    /// no-reply sentinel instead of aborting.
    pub budget: Duration,
}

impl WaitPolicy {
    /// Sub-second polling for UI-driven channels.
    pub fn tight() -> Self {
        Self {
            initial_delay: Duration::ZERO,
            poll_interval: Duration::from_millis(500),
            budget: Duration::from_secs(30),
        }
    }

    /// Long grace period for asynchronous bot platforms.
    pub fn relaxed() -> Self {
        Self {
            initial_delay: Duration::from_secs(15),
            poll_interval: Duration::from_secs(2),
            budget: Duration::from_secs(60),
        }
    }

    /// Override the total budget, keeping the channel's polling profile.
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }
}

/// Inter-message pacing applied by the orchestrator between exchanges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Cool-down slept between consecutive questions.
    pub cool_down: Duration,
    /// Reset the channel context every N questions within a topic
    /// (0 = never). The webchat widget accumulates DOM state and is
    /// refreshed every fifth question.
    pub refresh_every: usize,
}

impl Pacing {
    pub fn none() -> Self {
        Self {
            cool_down: Duration::ZERO,
            refresh_every: 0,
        }
    }

    /// Webchat profile: periodic refresh with a short settle delay.
    pub fn webchat() -> Self {
        Self {
            cool_down: Duration::from_secs(2),
            refresh_every: 5,
        }
    }
}
