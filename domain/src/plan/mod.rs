//! Test plan entities: topics and questions.
//!
//! A plan is loaded once per run and is immutable afterwards. Order matters:
//! topics execute in ordinal order and questions in the order the loader
//! produced them, and results are recorded in exactly that order.

mod question;
mod topic;

pub use question::Question;
pub use topic::Topic;

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The ordered set of topics driven through a channel in one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestPlan {
    topics: Vec<Topic>,
}

impl TestPlan {
    /// Build a plan from loaded topics.
    ///
    /// Returns [`DomainError::EmptyPlan`] if no topic carries at least one
    /// non-blank question — such a run would record nothing.
    pub fn new(topics: Vec<Topic>) -> Result<Self, DomainError> {
        let plan = Self { topics };
        if plan.question_count() == 0 {
            return Err(DomainError::EmptyPlan);
        }
        Ok(plan)
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Total number of topics.
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }

    /// Total number of non-blank questions across all topics.
    pub fn question_count(&self) -> usize {
        self.topics.iter().map(|t| t.questions().len()).sum()
    }
}
