//! Run execution state machine.
//!
//! `Idle → SessionReady → TopicActive → QuestionActive{Sent → Awaiting →
//! Scored → Recorded} → TopicComplete → RunComplete | RunFailed`.
//!
//! The orchestrator drives these transitions; illegal ones are rejected so
//! ordering bugs surface as errors instead of silently corrupted reports.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sub-phase of an active exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExchangePhase {
    /// Question handed to the adapter.
    Sent,
    /// Waiting for the reply under the channel's wait policy.
    Awaiting,
    /// Judgment obtained (or degraded).
    Scored,
    /// ExchangeResult persisted.
    Recorded,
}

/// Top-level run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Idle,
    SessionReady,
    TopicActive,
    QuestionActive(ExchangePhase),
    TopicComplete,
    RunComplete,
    RunFailed,
}

impl RunState {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition(&self, next: RunState) -> bool {
        use ExchangePhase::*;
        use RunState::*;
        matches!(
            (self, next),
            (Idle, SessionReady)
                | (Idle, RunFailed)
                | (SessionReady, TopicActive)
                | (SessionReady, RunFailed)
                | (TopicActive, QuestionActive(Sent))
                // a topic whose questions are all blank completes directly
                | (TopicActive, TopicComplete)
                | (QuestionActive(Sent), QuestionActive(Awaiting))
                // send failure skips straight to scoring-free recording
                | (QuestionActive(Sent), QuestionActive(Recorded))
                | (QuestionActive(Awaiting), QuestionActive(Scored))
                | (QuestionActive(Scored), QuestionActive(Recorded))
                | (QuestionActive(Recorded), QuestionActive(Sent))
                | (QuestionActive(Recorded), TopicComplete)
                | (TopicComplete, TopicActive)
                | (TopicComplete, RunComplete)
        )
    }

    /// Transition to `next`, or fail with [`DomainError::InvalidTransition`].
    pub fn transition(self, next: RunState) -> Result<RunState, DomainError> {
        if self.can_transition(next) {
            Ok(next)
        } else {
            Err(DomainError::InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }

    /// Terminal states end the run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::RunComplete | RunState::RunFailed)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "Idle"),
            RunState::SessionReady => write!(f, "SessionReady"),
            RunState::TopicActive => write!(f, "TopicActive"),
            RunState::QuestionActive(phase) => write!(f, "QuestionActive({:?})", phase),
            RunState::TopicComplete => write!(f, "TopicComplete"),
            RunState::RunComplete => write!(f, "RunComplete"),
            RunState::RunFailed => write!(f, "RunFailed"),
        }
    }
}

/// Final counters reported on the console at run end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub attempted: usize,
    pub passed: usize,
    pub failed: usize,
}

impl RunOutcome {
    pub fn record(&mut self, passed: bool) {
        self.attempted += 1;
        if passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ExchangePhase::*;
    use RunState::*;

    #[test]
    fn test_happy_path_transitions() {
        let states = [
            Idle,
            SessionReady,
            TopicActive,
            QuestionActive(Sent),
            QuestionActive(Awaiting),
            QuestionActive(Scored),
            QuestionActive(Recorded),
            TopicComplete,
            RunComplete,
        ];
        let mut current = states[0];
        for next in &states[1..] {
            current = current.transition(*next).unwrap();
        }
        assert!(current.is_terminal());
    }

    #[test]
    fn test_send_failure_short_circuits_to_recorded() {
        assert!(QuestionActive(Sent).can_transition(QuestionActive(Recorded)));
    }

    #[test]
    fn test_cannot_complete_run_mid_topic() {
        assert!(!QuestionActive(Awaiting).can_transition(RunComplete));
        assert!(TopicActive
            .transition(RunComplete)
            .is_err());
    }

    #[test]
    fn test_session_failure_is_terminal() {
        let state = Idle.transition(RunFailed).unwrap();
        assert!(state.is_terminal());
    }

    #[test]
    fn test_outcome_counters() {
        let mut outcome = RunOutcome::default();
        outcome.record(true);
        outcome.record(false);
        outcome.record(false);
        assert_eq!(outcome.attempted, 3);
        assert_eq!(outcome.passed, 1);
        assert_eq!(outcome.failed, 2);
    }
}
