//! Run summary entity

use crate::channel::ChannelMetadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cumulative snapshot of one run.
///
/// Recomputed and replaced wholesale after every exchange; only the latest
/// snapshot lives in the report. End time and duration stay empty until
/// [`finalize`](RunSummary::finalize) patches them at run end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: String,
    pub tester: String,
    /// Which judge scored the run (gateway provenance).
    pub judged_by: String,
    pub target: String,
    pub surface: String,
    pub client: String,
    pub date: String,
    pub start_time: String,
    pub total_topics: usize,
    pub total_questions: usize,
    pub passed: usize,
    pub failed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl RunSummary {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        run_id: impl Into<String>,
        tester: impl Into<String>,
        judged_by: impl Into<String>,
        metadata: &ChannelMetadata,
        started_at: DateTime<Utc>,
        total_topics: usize,
        total_questions: usize,
        passed: usize,
        failed: usize,
    ) -> Self {
        Self {
            run_id: run_id.into(),
            tester: tester.into(),
            judged_by: judged_by.into(),
            target: metadata.target.clone(),
            surface: metadata.surface.clone(),
            client: metadata.client.clone(),
            date: started_at.format("%Y-%m-%d").to_string(),
            start_time: started_at.format("%H:%M:%S").to_string(),
            total_topics,
            total_questions,
            passed,
            failed,
            end_time: None,
            duration: None,
        }
    }

    /// Patch the end-of-run fields in place.
    pub fn finalize(&mut self, ended_at: DateTime<Utc>, duration: std::time::Duration) {
        self.end_time = Some(ended_at.format("%H:%M:%S").to_string());
        let secs = duration.as_secs();
        self.duration = Some(format!(
            "{:02}:{:02}:{:02}",
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60
        ));
    }
}
