//! Application use cases

pub mod run_test;
pub mod session_manager;
