//! Date-partitioned report layout.
//!
//! Owns the on-disk path scheme:
//!
//! ```text
//! report/json/<date>/<run-name>.json
//! report/html/<date>/<run-name>.html
//! report/screenshot/<date>/<run-id>/<slug>.png
//! ```
//!
//! Directories are created on demand; path construction itself never fails.

use chrono::{Local, NaiveDate};
use std::io;
use std::path::{Path, PathBuf};

/// Resolves the dated paths for one run's artifacts.
#[derive(Debug, Clone)]
pub struct ReportLayout {
    base: PathBuf,
    run_name: String,
    run_id: String,
    date: NaiveDate,
}

impl ReportLayout {
    /// Layout rooted at `base` for today's date.
    pub fn new(base: impl Into<PathBuf>, run_name: impl Into<String>, run_id: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            run_name: run_name.into(),
            run_id: run_id.into(),
            date: Local::now().date_naive(),
        }
    }

    /// Pin the date partition (tests).
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// `report/json/<date>/<run-name>.json`
    pub fn json_document(&self) -> PathBuf {
        self.base
            .join("report")
            .join("json")
            .join(self.date_str())
            .join(format!("{}.json", self.run_name))
    }

    /// `report/html/<date>/<run-name>.html`
    pub fn html_document(&self) -> PathBuf {
        self.base
            .join("report")
            .join("html")
            .join(self.date_str())
            .join(format!("{}.html", self.run_name))
    }

    /// `report/screenshot/<date>/<run-id>/`
    pub fn screenshot_dir(&self) -> PathBuf {
        self.base
            .join("report")
            .join("screenshot")
            .join(self.date_str())
            .join(&self.run_id)
    }

    /// `log/<date>/` for the rolling run log.
    pub fn log_dir(&self) -> PathBuf {
        self.base.join("log").join(self.date_str())
    }

    /// Ensure the parent directory of `path` exists.
    pub fn ensure_parent(path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}
