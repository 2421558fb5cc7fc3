//! Run progress port
//!
//! Console/UI notifications emitted as the run advances. Implementations
//! live in the presentation layer.

use chatcheck_domain::{ExchangeResult, RunOutcome, RunState};
use std::time::Duration;

/// Observer of run progress.
pub trait RunProgress: Send + Sync {
    /// Called on every accepted state transition.
    fn on_state(&self, _state: RunState) {}

    fn on_topic_started(&self, _title: &str, _ordinal: usize, _total: usize) {}

    fn on_exchange_recorded(&self, _result: &ExchangeResult) {}

    fn on_topic_completed(&self, _title: &str, _duration: Duration) {}

    fn on_run_completed(&self, _outcome: &RunOutcome) {}
}

/// Progress sink that reports nothing (quiet mode).
pub struct NoProgress;

impl RunProgress for NoProgress {}
