//! Exchange result entity

use super::verdict::Verdict;
use serde::{Deserialize, Serialize};

/// Fixed text recorded as the actual reply when the channel never answered
/// within the wait budget.
pub const NO_REPLY_SENTINEL: &str = "no reply received";

/// The recorded outcome of one exchange.
///
/// Created exactly once per attempted (non-blank) question, appended to the
/// report's `data` slot, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeResult {
    /// Ordinal of the owning topic in the test data.
    pub no: usize,
    /// Title of the owning topic.
    pub title: String,
    /// Source key of the question column.
    pub question_key: String,
    /// The question as sent.
    pub question: String,
    /// Expected answer from the test data.
    pub expected: String,
    /// Actual reply (whitespace-normalized); empty on send failure,
    /// [`NO_REPLY_SENTINEL`] on timeout.
    pub actual: String,
    /// Verdict label.
    pub status: Verdict,
    /// Gateway score (0-100; 0 when degraded).
    pub score: f64,
    /// Gateway explanation of the score.
    pub explanation: String,
    /// Exchange wall-clock duration in milliseconds.
    pub duration_ms: u64,
    /// Relative path of the captured screenshot, when the channel supports
    /// artifact capture.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
}
