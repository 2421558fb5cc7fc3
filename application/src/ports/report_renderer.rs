//! Report renderer port
//!
//! Converts the stored JSON document into a viewable artifact. Invoked after
//! every persisted exchange and at finalize; the real templating engine is
//! external to the core.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Rendering failures. Never fatal for the run.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Render I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report document unreadable: {0}")]
    BadDocument(String),
}

/// External renderer consuming the persisted JSON document.
pub trait ReportRenderer: Send + Sync {
    /// Re-render the viewable artifact from the document at `json_path`,
    /// returning where the artifact was written.
    fn render(&self, json_path: &Path) -> Result<PathBuf, RenderError>;
}

/// Renderer that does nothing (rendering disabled).
pub struct NoRenderer;

impl ReportRenderer for NoRenderer {
    fn render(&self, json_path: &Path) -> Result<PathBuf, RenderError> {
        Ok(json_path.to_path_buf())
    }
}
