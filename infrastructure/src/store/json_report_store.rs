//! Crash-safe JSON report store.
//!
//! Every operation is a full read-modify-write of the document followed by
//! an atomic replace: the new content is written to a temporary file in the
//! same directory and renamed over the target. A reader (the renderer, or a
//! human inspecting a run in flight) therefore never sees a torn document,
//! and after a crash the file reflects every exchange completed so far.

use crate::layout::ReportLayout;
use chatcheck_application::ports::report_store::{ReportStore, ReportStoreError};
use chatcheck_domain::{ChartEntry, ExchangeResult, Report, RunSummary};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Write attempts before giving up on one operation.
const WRITE_ATTEMPTS: u32 = 3;
/// Pause between write retries.
const RETRY_PAUSE: Duration = Duration::from_millis(200);

/// Filesystem-backed [`ReportStore`] for one run document.
pub struct JsonReportStore {
    path: PathBuf,
}

impl JsonReportStore {
    /// Store backed by the layout's dated JSON document path.
    pub fn new(layout: &ReportLayout) -> Self {
        Self {
            path: layout.json_document(),
        }
    }

    /// Store backed by an explicit path (tests).
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the current document; a missing or corrupt file decodes to the
    /// empty skeleton rather than failing the run.
    fn read(&self) -> Report {
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(report) => report,
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e,
                        "report document corrupt, starting from skeleton");
                    Report::skeleton()
                }
            },
            Err(_) => Report::skeleton(),
        }
    }

    /// Serialize and atomically replace the backing file, retrying
    /// best-effort on I/O failure.
    fn write(&self, report: &Report) -> Result<(), ReportStoreError> {
        let content = serde_json::to_string_pretty(report)?;
        let mut last_err: Option<std::io::Error> = None;
        for attempt in 1..=WRITE_ATTEMPTS {
            match self.write_atomic(&content) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        attempt,
                        error = %e,
                        "report write failed"
                    );
                    last_err = Some(e);
                    std::thread::sleep(RETRY_PAUSE);
                }
            }
        }
        Err(ReportStoreError::Io(last_err.unwrap_or_else(|| {
            std::io::Error::other("report write failed")
        })))
    }

    fn write_atomic(&self, content: &str) -> std::io::Result<()> {
        ReportLayout::ensure_parent(&self.path)?;
        // Temp file in the same directory so the rename stays on one
        // filesystem and is atomic.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn update<F>(&self, mutate: F) -> Result<(), ReportStoreError>
    where
        F: FnOnce(&mut Report),
    {
        let mut report = self.read();
        mutate(&mut report);
        self.write(&report)
    }
}

impl ReportStore for JsonReportStore {
    fn reset(&self) -> Result<(), ReportStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "removed stale report document");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ReportStoreError::Io(e)),
        }
    }

    fn append_exchange(&self, result: &ExchangeResult) -> Result<(), ReportStoreError> {
        self.update(|report| report.data.push(result.clone()))
    }

    fn replace_summary(&self, summary: &RunSummary) -> Result<(), ReportStoreError> {
        self.update(|report| report.replace_summary(summary.clone()))
    }

    fn append_chart_entry(&self, entry: &ChartEntry) -> Result<(), ReportStoreError> {
        self.update(|report| report.chart.push(entry.clone()))
    }

    fn finalize(
        &self,
        ended_at: DateTime<Utc>,
        duration: Duration,
    ) -> Result<(), ReportStoreError> {
        self.update(|report| {
            if let Some(summary) = report.summary.first_mut() {
                summary.finalize(ended_at, duration);
            }
        })
    }

    fn document_path(&self) -> &Path {
        &self.path
    }
}
