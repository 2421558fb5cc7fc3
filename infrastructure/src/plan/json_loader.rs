//! Converted-spreadsheet plan loader.
//!
//! The spreadsheet converter runs outside the harness and emits a JSON array
//! of row objects with lower-cased keys: `no`, `title`, `context` (the
//! expected answer shared by the row's questions) and a family of
//! question columns named by a common prefix plus numeric suffix
//! (`question1`, `question2`, ...). Blank cells stay in the file; they are
//! dropped here so downstream counters never see them.

use chatcheck_domain::{DomainError, Question, TestPlan, Topic};
use serde_json::{Map, Value};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

const DEFAULT_QUESTION_PREFIX: &str = "question";

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Failed to read plan file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse plan file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Plan row {0} is not a JSON object")]
    MalformedRow(usize),

    #[error("Plan contains no questions")]
    Empty,
}

impl From<DomainError> for PlanError {
    fn from(_: DomainError) -> Self {
        PlanError::Empty
    }
}

/// Loads a [`TestPlan`] from converted-spreadsheet JSON.
pub struct PlanLoader {
    question_prefix: String,
}

impl Default for PlanLoader {
    fn default() -> Self {
        Self {
            question_prefix: DEFAULT_QUESTION_PREFIX.to_string(),
        }
    }
}

impl PlanLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the question column prefix (source data uses localized
    /// column names, e.g. `pertanyaan`).
    pub fn with_question_prefix(prefix: impl Into<String>) -> Self {
        Self {
            question_prefix: prefix.into(),
        }
    }

    pub fn load(&self, path: &Path) -> Result<TestPlan, PlanError> {
        let raw = std::fs::read_to_string(path)?;
        let plan = self.parse(&raw)?;
        info!(
            path = %path.display(),
            topics = plan.topic_count(),
            questions = plan.question_count(),
            "test plan loaded"
        );
        Ok(plan)
    }

    pub fn parse(&self, raw: &str) -> Result<TestPlan, PlanError> {
        let rows: Vec<Value> = serde_json::from_str(raw)?;
        let mut topics = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_object().ok_or(PlanError::MalformedRow(index))?;
            topics.push(self.topic_from_row(index, row));
        }
        Ok(TestPlan::new(topics)?)
    }

    fn topic_from_row(&self, index: usize, row: &Map<String, Value>) -> Topic {
        let ordinal = row
            .get("no")
            .and_then(ordinal_value)
            .unwrap_or(index + 1);
        let title = text_field(row, "title");
        let expected = text_field(row, "context");

        // Question columns ordered by numeric suffix, not map iteration order.
        let mut keyed: Vec<(u32, &str, &str)> = row
            .iter()
            .filter_map(|(key, value)| {
                let suffix = key.strip_prefix(&self.question_prefix)?;
                let rank: u32 = suffix.parse().ok()?;
                Some((rank, key.as_str(), value.as_str().unwrap_or("")))
            })
            .collect();
        keyed.sort_by_key(|(rank, _, _)| *rank);

        let questions: Vec<Question> = keyed
            .into_iter()
            .filter_map(|(_, key, text)| Question::try_new(key, text, &expected, &title))
            .collect();
        debug!(ordinal, title = title.as_str(), count = questions.len(), "topic parsed");
        Topic::new(ordinal, title, questions)
    }
}

fn text_field(row: &Map<String, Value>, key: &str) -> String {
    match row.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn ordinal_value(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => n.as_u64().map(|n| n as usize),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
