//! Application layer for chatcheck
//!
//! Use cases (the session manager and the test orchestrator) and the port
//! contracts their collaborators must satisfy. Adapters for the ports live
//! in the infrastructure layer; this crate performs no I/O of its own beyond
//! what the ports expose.

pub mod ports;
pub mod use_cases;

pub use ports::channel::{AdapterError, ChannelAdapter, ChannelGateway};
pub use ports::login_flow::{LoginError, LoginFlow};
pub use ports::progress::{NoProgress, RunProgress};
pub use ports::report_renderer::{NoRenderer, RenderError, ReportRenderer};
pub use ports::report_store::{ReportStore, ReportStoreError};
pub use ports::scoring_gateway::{ScoringError, ScoringGateway};
pub use ports::session_repository::{SessionRepository, SessionStoreError};
pub use use_cases::run_test::{RunError, RunTestInput, RunTestUseCase};
pub use use_cases::session_manager::{SessionError, SessionManager};
