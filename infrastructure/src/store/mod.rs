//! Report document persistence

mod json_report_store;

pub use json_report_store::JsonReportStore;
