//! Pass/fail classification.

use crate::util::normalize_whitespace;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default pass mark on the 0-100 gateway score scale.
pub const DEFAULT_SCORE_THRESHOLD: f64 = 70.0;

/// Outcome label for a single exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The reply satisfied the expected answer.
    Pass,
    /// A reply was recorded but did not satisfy the expected answer.
    Fail,
    /// The exchange could not complete (send failure); terminal for the
    /// exchange, never for the run.
    Error,
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::Pass => "Pass",
            Verdict::Fail => "Fail",
            Verdict::Error => "Error",
        };
        write!(f, "{}", label)
    }
}

/// How a channel classifies pass/fail for an exchange.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerdictPolicy {
    /// Pass when the gateway score reaches the threshold.
    ScoreThreshold(f64),
    /// Pass when the expected answer text is contained in the actual reply
    /// (case-insensitive, whitespace-normalized). Used where no scoring
    /// service is wired in.
    Containment,
}

impl VerdictPolicy {
    pub fn score_threshold_default() -> Self {
        VerdictPolicy::ScoreThreshold(DEFAULT_SCORE_THRESHOLD)
    }

    /// Classify one exchange.
    pub fn classify(&self, score: f64, actual: &str, expected: &str) -> Verdict {
        match self {
            VerdictPolicy::ScoreThreshold(threshold) => {
                if score >= *threshold {
                    Verdict::Pass
                } else {
                    Verdict::Fail
                }
            }
            VerdictPolicy::Containment => {
                let actual = normalize_whitespace(actual).to_lowercase();
                let expected = normalize_whitespace(expected).to_lowercase();
                if !expected.is_empty() && actual.contains(&expected) {
                    Verdict::Pass
                } else {
                    Verdict::Fail
                }
            }
        }
    }
}

/// The judgment produced by the scoring gateway for one reply pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    /// Numeric score on a 0-100 scale.
    pub score: f64,
    /// Gateway's own verdict label (informational; classification is done
    /// locally via [`VerdictPolicy`]).
    pub label: String,
    /// Free-text explanation of the score.
    pub explanation: String,
    /// Which judge produced the score (model/service name).
    pub provenance: String,
}

impl Judgment {
    /// Zero-equivalent judgment substituted when the gateway fails, so the
    /// exchange is still recorded and the run continues.
    pub fn degraded(reason: impl fmt::Display) -> Self {
        Self {
            score: 0.0,
            label: "Unscored".to_string(),
            explanation: format!("Scoring unavailable: {}", reason),
            provenance: "none".to_string(),
        }
    }
}
