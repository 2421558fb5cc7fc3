//! Report document entities.
//!
//! The report is a single JSON document with three slots:
//! `{"summary": [...], "chart": [...], "data": [...]}`. `data` is the
//! append-only list of exchange results in execution order, `chart` holds
//! one duration entry per completed topic, and `summary` keeps only the
//! latest cumulative [`RunSummary`] snapshot.

mod document;
mod exchange;
mod summary;
mod verdict;

pub use document::{ChartEntry, Report};
pub use exchange::{ExchangeResult, NO_REPLY_SENTINEL};
pub use summary::RunSummary;
pub use verdict::{Judgment, Verdict, VerdictPolicy};
