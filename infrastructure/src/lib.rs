//! Infrastructure layer for chatcheck
//!
//! Adapters for the application ports: the filesystem report store and
//! session repository, figment-based configuration, the HTTP scoring
//! gateway, the channel dispatch glue, and the JSON plan loader.

pub mod channels;
pub mod config;
pub mod layout;
pub mod plan;
pub mod render;
pub mod scoring;
pub mod session;
pub mod store;

pub use channels::{
    gateway_for, BoundedWaitAdapter, ChannelTransport, HttpRelayTransport, RetryPolicy,
    TransportConnector, TransportError, TransportGateway,
};
pub use config::{ConfigError, ConfigLoader, FileConfig, RunConfig};
pub use layout::ReportLayout;
pub use plan::{PlanError, PlanLoader};
pub use render::HtmlSnapshotRenderer;
pub use scoring::HttpScoringGateway;
pub use session::{EnvLoginFlow, FsSessionRepository};
pub use store::JsonReportStore;
