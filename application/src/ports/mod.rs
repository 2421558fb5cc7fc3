//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod channel;
pub mod login_flow;
pub mod progress;
pub mod report_renderer;
pub mod report_store;
pub mod scoring_gateway;
pub mod session_repository;
