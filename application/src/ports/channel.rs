//! Channel gateway and adapter ports
//!
//! Defines the fixed capability contract a deployment channel must satisfy.
//! Implementations encapsulate their own transport, latency profile and
//! bounded retry strategy; the orchestrator only supplies a logical
//! [`WaitPolicy`] budget.

use async_trait::async_trait;
use chatcheck_domain::{Channel, Session, WaitPolicy};
use thiserror::Error;

/// Errors that can occur during channel operations.
///
/// All variants are per-exchange: the orchestrator records them into the
/// report and continues. Only a failure to *open* the channel is fatal.
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Send failed: {0}")]
    Send(String),

    #[error("No reply within the wait budget")]
    Timeout,

    #[error("Channel connection error: {0}")]
    Connection(String),

    #[error("Transport closed")]
    TransportClosed,

    #[error("Other channel error: {0}")]
    Other(String),
}

/// Gateway for opening a conversation on the selected channel.
///
/// Mirrors the tagged-dispatch rule: the gateway is chosen once at run
/// start from the configured [`Channel`] and never switched mid-run.
#[async_trait]
pub trait ChannelGateway: Send + Sync {
    /// The channel this gateway drives.
    fn channel(&self) -> Channel;

    /// Open an active conversation, attaching the acquired session when the
    /// channel requires one. Failure here makes the run `RunFailed`.
    async fn open(&self, session: Option<&Session>)
        -> Result<Box<dyn ChannelAdapter>, AdapterError>;
}

/// An active conversation on one channel.
///
/// Owned by value by the orchestrator for the duration of the run; the
/// shared page/conversation state is not safely concurrent, so no parallel
/// exchanges happen on one adapter.
#[async_trait]
pub trait ChannelAdapter: Send {
    /// Deliver one message to the agent under test.
    async fn send(&mut self, text: &str) -> Result<(), AdapterError>;

    /// Wait for the agent's reply under the given policy.
    ///
    /// `Ok(None)` means the budget elapsed without a reply — the
    /// orchestrator substitutes the no-reply sentinel and continues.
    async fn await_reply(&mut self, policy: WaitPolicy) -> Result<Option<String>, AdapterError>;

    /// Capture a visual artifact for the exchange, if the channel supports
    /// it. The returned reference is stored verbatim in the report.
    async fn capture_artifact(&mut self, _slug: &str) -> Option<String> {
        None
    }

    /// Reset the conversation context (e.g. reload the page) to avoid
    /// state bleed between topics. Best-effort.
    async fn reset_context(&mut self) -> Result<(), AdapterError> {
        Ok(())
    }
}
