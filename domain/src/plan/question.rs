//! Question value object

use serde::{Deserialize, Serialize};

/// A single question/expected-answer pair (Value Object).
///
/// Immutable once loaded. Blank question text never becomes a `Question`:
/// [`Question::try_new`] returns `None`, which is how blank spreadsheet cells
/// are skipped without touching any counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    key: String,
    text: String,
    expected: String,
    context: String,
}

impl Question {
    /// Try to create a question, returning `None` if the text is blank.
    pub fn try_new(
        key: impl Into<String>,
        text: impl Into<String>,
        expected: impl Into<String>,
        context: impl Into<String>,
    ) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        Some(Self {
            key: key.into(),
            text: text.trim().to_string(),
            expected: expected.into(),
            context: context.into(),
        })
    }

    /// Source column key (e.g. `question3`), used for artifact naming.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The question text sent to the channel.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The expected answer judged against the actual reply.
    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// Free-form context carried from the test data.
    pub fn context(&self) -> &str {
        &self.context
    }
}
