//! Channel gateway selected once at run start.

use super::adapter::BoundedWaitAdapter;
use super::retry::RetryPolicy;
use super::transport::TransportConnector;
use async_trait::async_trait;
use chatcheck_application::ports::channel::{AdapterError, ChannelAdapter, ChannelGateway};
use chatcheck_domain::{Channel, Session};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// [`ChannelGateway`] that connects a transport and wraps it in a
/// [`BoundedWaitAdapter`] with the channel's retry policy.
pub struct TransportGateway {
    channel: Channel,
    connector: Arc<dyn TransportConnector>,
    retry: RetryPolicy,
    artifact_dir: Option<PathBuf>,
}

impl TransportGateway {
    pub fn new(channel: Channel, connector: Arc<dyn TransportConnector>, retry: RetryPolicy) -> Self {
        Self {
            channel,
            connector,
            retry,
            artifact_dir: None,
        }
    }

    /// Directory screenshot artifacts are captured into on channels that
    /// support them.
    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = Some(dir.into());
        self
    }
}

#[async_trait]
impl ChannelGateway for TransportGateway {
    fn channel(&self) -> Channel {
        self.channel
    }

    async fn open(
        &self,
        session: Option<&Session>,
    ) -> Result<Box<dyn ChannelAdapter>, AdapterError> {
        let transport = self
            .connector
            .connect(self.channel, session)
            .await
            .map_err(|e| AdapterError::Connection(e.to_string()))?;
        info!(channel = %self.channel, "channel transport connected");
        let mut adapter = BoundedWaitAdapter::new(transport, self.retry);
        if let Some(dir) = &self.artifact_dir {
            adapter = adapter.with_artifact_dir(dir);
        }
        Ok(Box::new(adapter))
    }
}

/// Gateway for `channel` with the retry schedule matching its pacing:
/// tight for the synchronous webchat surface, relaxed for bot platforms
/// that answer asynchronously.
pub fn gateway_for(channel: Channel, connector: Arc<dyn TransportConnector>) -> TransportGateway {
    let retry = match channel {
        Channel::Webchat => RetryPolicy::tight(),
        Channel::Telegram | Channel::Instagram | Channel::Facebook => RetryPolicy::relaxed(),
    };
    TransportGateway::new(channel, connector, retry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::transport::{ChannelTransport, TransportError};

    struct EchoTransport;

    #[async_trait]
    impl ChannelTransport for EchoTransport {
        async fn deliver(&mut self, _text: &str) -> Result<(), TransportError> {
            Ok(())
        }

        async fn fetch_reply(&mut self) -> Result<Option<String>, TransportError> {
            Ok(Some("ok".to_string()))
        }

        async fn capture(&mut self, dest: &std::path::Path) -> Option<String> {
            Some(dest.to_string_lossy().into_owned())
        }
    }

    struct EchoConnector;

    #[async_trait]
    impl TransportConnector for EchoConnector {
        async fn connect(
            &self,
            _channel: Channel,
            _session: Option<&Session>,
        ) -> Result<Box<dyn ChannelTransport>, TransportError> {
            Ok(Box::new(EchoTransport))
        }
    }

    struct BrokenConnector;

    #[async_trait]
    impl TransportConnector for BrokenConnector {
        async fn connect(
            &self,
            channel: Channel,
            _session: Option<&Session>,
        ) -> Result<Box<dyn ChannelTransport>, TransportError> {
            Err(TransportError::Unavailable(channel))
        }
    }

    #[tokio::test]
    async fn test_open_produces_working_adapter() {
        let gateway = gateway_for(Channel::Webchat, Arc::new(EchoConnector));
        assert_eq!(gateway.channel(), Channel::Webchat);
        let mut adapter = gateway.open(None).await.unwrap();
        adapter.send("hello").await.unwrap();
    }

    #[tokio::test]
    async fn test_artifact_dir_reaches_opened_adapter() {
        let gateway = gateway_for(Channel::Webchat, Arc::new(EchoConnector))
            .with_artifact_dir("report/screenshot/2026-08-30/run-1");
        let mut adapter = gateway.open(None).await.unwrap();

        let reference = adapter.capture_artifact("first-question").await.unwrap();
        assert!(reference.ends_with("first-question.png"));
    }

    #[tokio::test]
    async fn test_connect_failure_surfaces_as_connection_error() {
        let gateway = gateway_for(Channel::Telegram, Arc::new(BrokenConnector));
        assert!(matches!(
            gateway.open(None).await,
            Err(AdapterError::Connection(_))
        ));
    }
}
