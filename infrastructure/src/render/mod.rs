//! Report renderers.

mod html_snapshot;

pub use html_snapshot::HtmlSnapshotRenderer;
