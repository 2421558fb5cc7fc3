//! Channel transport contract and the built-in HTTP relay.
//!
//! A transport is the raw per-channel mechanic: deliver one message, fetch
//! the newest reply, optionally reset the conversation surface or capture a
//! screenshot. Real platform drivers (browser automation, Telegram client,
//! Graph API) live outside this crate and implement [`TransportConnector`];
//! the built-in [`HttpRelayTransport`] covers deployments that expose the
//! conversation through a relay endpoint.

use async_trait::async_trait;
use chatcheck_domain::{Channel, Session};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Raw transport failures.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("No transport available for channel {0}")]
    Unavailable(Channel),

    #[error("Transport rejected the message: {0}")]
    Rejected(String),
}

/// Minimal capability set a channel mechanic must provide.
#[async_trait]
pub trait ChannelTransport: Send {
    /// Deliver one message to the target conversation.
    async fn deliver(&mut self, text: &str) -> Result<(), TransportError>;

    /// Fetch the newest reply that arrived after the last delivery, if any.
    async fn fetch_reply(&mut self) -> Result<Option<String>, TransportError>;

    /// Reset the conversation surface (e.g. reload the page).
    async fn reset(&mut self) -> Result<(), TransportError> {
        Ok(())
    }

    /// Capture a visual artifact to `dest`; returns the reference recorded
    /// into the report.
    async fn capture(&mut self, _dest: &Path) -> Option<String> {
        None
    }
}

/// Factory for channel transports, invoked once at run start with the
/// acquired session.
#[async_trait]
pub trait TransportConnector: Send + Sync {
    async fn connect(
        &self,
        channel: Channel,
        session: Option<&Session>,
    ) -> Result<Box<dyn ChannelTransport>, TransportError>;
}

#[derive(Debug, Deserialize)]
struct RelayReply {
    id: String,
    text: String,
}

/// HTTP relay transport: messages go out as a JSON POST, replies are polled
/// from a companion endpoint that returns the newest message and its id.
pub struct HttpRelayTransport {
    client: reqwest::Client,
    send_url: String,
    poll_url: String,
    target: String,
    last_seen: Option<String>,
}

impl HttpRelayTransport {
    pub fn new(
        send_url: impl Into<String>,
        poll_url: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            send_url: send_url.into(),
            poll_url: poll_url.into(),
            target: target.into(),
            last_seen: None,
        }
    }

    /// Connector producing a fresh relay transport per run.
    pub fn connector(
        send_url: impl Into<String>,
        poll_url: impl Into<String>,
        target: impl Into<String>,
    ) -> RelayConnector {
        RelayConnector {
            send_url: send_url.into(),
            poll_url: poll_url.into(),
            target: target.into(),
        }
    }
}

#[async_trait]
impl ChannelTransport for HttpRelayTransport {
    async fn deliver(&mut self, text: &str) -> Result<(), TransportError> {
        let response = self
            .client
            .post(&self.send_url)
            .json(&serde_json::json!({ "to": self.target, "text": text }))
            .send()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;
        if !response.status().is_success() {
            return Err(TransportError::Rejected(response.status().to_string()));
        }
        Ok(())
    }

    async fn fetch_reply(&mut self) -> Result<Option<String>, TransportError> {
        let response = self
            .client
            .get(&self.poll_url)
            .query(&[("to", self.target.as_str())])
            .send()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;
        if response.status() == reqwest::StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let reply: RelayReply = response
            .json()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;
        if self.last_seen.as_deref() == Some(reply.id.as_str()) {
            return Ok(None);
        }
        debug!(id = reply.id.as_str(), "relay reply received");
        self.last_seen = Some(reply.id);
        Ok(Some(reply.text))
    }
}

/// [`TransportConnector`] for the HTTP relay.
pub struct RelayConnector {
    send_url: String,
    poll_url: String,
    target: String,
}

#[async_trait]
impl TransportConnector for RelayConnector {
    async fn connect(
        &self,
        _channel: Channel,
        _session: Option<&Session>,
    ) -> Result<Box<dyn ChannelTransport>, TransportError> {
        Ok(Box::new(HttpRelayTransport::new(
            self.send_url.clone(),
            self.poll_url.clone(),
            self.target.clone(),
        )))
    }
}
