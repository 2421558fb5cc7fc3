//! Bounded-wait adapter over any transport.
//!
//! Normalizes callback-driven and polling transports behind the adapter's
//! `await_reply` contract: to the orchestrator it is always a bounded
//! blocking call, whatever the channel's internal concurrency model.

use super::retry::RetryPolicy;
use super::transport::ChannelTransport;
use async_trait::async_trait;
use chatcheck_application::ports::channel::{AdapterError, ChannelAdapter};
use chatcheck_domain::WaitPolicy;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, warn};

/// [`ChannelAdapter`] implementation wrapping a raw [`ChannelTransport`].
pub struct BoundedWaitAdapter {
    transport: Box<dyn ChannelTransport>,
    retry: RetryPolicy,
    artifact_dir: Option<PathBuf>,
}

impl BoundedWaitAdapter {
    pub fn new(transport: Box<dyn ChannelTransport>, retry: RetryPolicy) -> Self {
        Self {
            transport,
            retry,
            artifact_dir: None,
        }
    }

    /// Directory artifacts are captured into; without one, capture is a no-op.
    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = Some(dir.into());
        self
    }
}

#[async_trait]
impl ChannelAdapter for BoundedWaitAdapter {
    async fn send(&mut self, text: &str) -> Result<(), AdapterError> {
        let mut delays = self.retry.delays();
        loop {
            match self.transport.deliver(text).await {
                Ok(()) => return Ok(()),
                Err(e) => match delays.next() {
                    Some(delay) => {
                        warn!(error = %e, backoff_ms = delay.as_millis() as u64, "send retry");
                        tokio::time::sleep(delay).await;
                    }
                    None => return Err(AdapterError::Send(e.to_string())),
                },
            }
        }
    }

    async fn await_reply(&mut self, policy: WaitPolicy) -> Result<Option<String>, AdapterError> {
        tokio::time::sleep(policy.initial_delay).await;
        let deadline = Instant::now() + policy.budget;
        let mut consecutive_errors = 0u32;
        loop {
            match self.transport.fetch_reply().await {
                Ok(Some(reply)) => return Ok(Some(reply)),
                Ok(None) => {
                    consecutive_errors = 0;
                }
                Err(e) => {
                    consecutive_errors += 1;
                    if consecutive_errors >= self.retry.max_attempts {
                        return Err(AdapterError::Connection(e.to_string()));
                    }
                    debug!(error = %e, "reply poll failed, will retry");
                }
            }
            if Instant::now() + policy.poll_interval > deadline {
                return Ok(None);
            }
            tokio::time::sleep(policy.poll_interval).await;
        }
    }

    async fn capture_artifact(&mut self, slug: &str) -> Option<String> {
        let dir = self.artifact_dir.as_ref()?;
        self.transport.capture(&dir.join(format!("{slug}.png"))).await
    }

    async fn reset_context(&mut self) -> Result<(), AdapterError> {
        self.transport
            .reset()
            .await
            .map_err(|e| AdapterError::Other(e.to_string()))
    }
}
