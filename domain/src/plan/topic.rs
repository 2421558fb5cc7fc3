//! Topic entity

use super::Question;
use serde::{Deserialize, Serialize};

/// A named group of questions sharing one duration measurement.
///
/// Immutable once loaded for a run. `ordinal` is the position from the test
/// data (1-based), recorded into each exchange so report rows can be traced
/// back to their source rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    ordinal: usize,
    title: String,
    questions: Vec<Question>,
}

impl Topic {
    pub fn new(ordinal: usize, title: impl Into<String>, questions: Vec<Question>) -> Self {
        let title = title.into();
        let title = if title.trim().is_empty() {
            "Untitled".to_string()
        } else {
            title
        };
        Self {
            ordinal,
            title,
            questions,
        }
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The topic's non-blank questions, in execution order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}
