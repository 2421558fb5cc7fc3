//! The report document.

use super::exchange::ExchangeResult;
use super::summary::RunSummary;
use serde::{Deserialize, Serialize};

/// One completed topic's wall-clock duration, appended to the `chart` slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartEntry {
    pub title: String,
    pub duration_ms: u64,
}

/// The full report document as persisted to
/// `report/json/<date>/<run-name>.json`.
///
/// `summary` is a one-element array by construction (latest snapshot wins);
/// it stays an array in the JSON shape so renderers can treat all three
/// slots uniformly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub summary: Vec<RunSummary>,
    pub chart: Vec<ChartEntry>,
    pub data: Vec<ExchangeResult>,
}

impl Report {
    /// The empty skeleton a missing or corrupt file decodes to.
    pub fn skeleton() -> Self {
        Self::default()
    }

    /// Latest summary snapshot, if any exchange has been recorded yet.
    pub fn summary(&self) -> Option<&RunSummary> {
        self.summary.first()
    }

    /// Replace the summary slot wholesale.
    pub fn replace_summary(&mut self, summary: RunSummary) {
        self.summary = vec![summary];
    }

    /// Counter consistency: `passed + failed == data.len()` once the first
    /// exchange has landed.
    pub fn is_consistent(&self) -> bool {
        match self.summary.first() {
            Some(s) => s.passed + s.failed == self.data.len(),
            None => self.data.is_empty() && self.chart.is_empty(),
        }
    }
}
