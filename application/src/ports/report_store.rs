//! Report store port
//!
//! Owns the append-only report document and its durable persistence. Every
//! operation is a full read-modify-write followed by an atomic replace, so
//! an external reader (including the renderer) never observes a torn
//! document.

use chatcheck_domain::{ChartEntry, ExchangeResult, RunSummary};
use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Persistence failures. Logged and retried best-effort by implementations;
/// the orchestrator never aborts the in-memory sequence over one of these.
#[derive(Error, Debug)]
pub enum ReportStoreError {
    #[error("Report I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable, crash-visible report document.
pub trait ReportStore: Send + Sync {
    /// Remove a stale document for this run name, if any, so a fresh run
    /// starts from the empty skeleton.
    fn reset(&self) -> Result<(), ReportStoreError>;

    /// Append one exchange to the `data` slot.
    fn append_exchange(&self, result: &ExchangeResult) -> Result<(), ReportStoreError>;

    /// Overwrite the `summary` slot wholesale with the latest snapshot.
    fn replace_summary(&self, summary: &RunSummary) -> Result<(), ReportStoreError>;

    /// Append one completed topic's duration to the `chart` slot.
    fn append_chart_entry(&self, entry: &ChartEntry) -> Result<(), ReportStoreError>;

    /// Patch the existing summary's end time and duration in place.
    fn finalize(&self, ended_at: DateTime<Utc>, duration: Duration)
        -> Result<(), ReportStoreError>;

    /// Location of the backing JSON document, handed to the renderer.
    fn document_path(&self) -> &Path;
}
