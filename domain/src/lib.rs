//! Domain layer for chatcheck
//!
//! This crate contains the core entities and value objects of the regression
//! harness. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Exchange
//!
//! One send/await/score/record cycle for a single question. A run walks an
//! ordered [`TestPlan`] of topics and questions, performing one exchange per
//! non-blank question and appending exactly one [`ExchangeResult`] for each.
//!
//! ## Channel
//!
//! The deployment surface under test (web chat widget or a messaging-bot
//! platform). Selected once at run start and never switched mid-run.

pub mod channel;
pub mod core;
pub mod plan;
pub mod report;
pub mod run;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use channel::{Channel, ChannelMetadata, Pacing, WaitPolicy};
pub use crate::core::error::DomainError;
pub use plan::{Question, TestPlan, Topic};
pub use report::{
    ChartEntry, ExchangeResult, Judgment, Report, RunSummary, Verdict, VerdictPolicy,
    NO_REPLY_SENTINEL,
};
pub use run::{ExchangePhase, RunOutcome, RunState};
pub use session::{CredentialArtifact, CredentialRecord, Session};
pub use util::{normalize_whitespace, slugify, truncate_str};
