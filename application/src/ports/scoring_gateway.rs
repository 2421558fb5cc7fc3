//! Scoring gateway port
//!
//! Turns an (actual, expected) reply pair into a [`Judgment`]. Treated as a
//! black box; the orchestrator substitutes a degraded zero score on failure
//! rather than aborting the run.

use async_trait::async_trait;
use chatcheck_domain::Judgment;
use thiserror::Error;

/// Errors from the external judgment service.
#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Judgment service unreachable: {0}")]
    Unreachable(String),

    #[error("Judgment service returned an unusable response: {0}")]
    BadResponse(String),

    #[error("Judgment request timed out")]
    Timeout,
}

/// External judgment service.
#[async_trait]
pub trait ScoringGateway: Send + Sync {
    /// Score the actual reply against the expected answer.
    async fn score(&self, actual: &str, expected: &str) -> Result<Judgment, ScoringError>;

    /// Name of the judge, recorded into the run summary.
    fn provenance(&self) -> &str;
}
