//! Environment-credential login flow.
//!
//! The bot platforms authenticate with pre-provisioned secrets (a session
//! string, an API token) injected through environment variables in CI. This
//! flow turns those variables into a credential artifact; truly interactive
//! logins (browser-driven) are external [`LoginFlow`] implementations.

use async_trait::async_trait;
use chatcheck_application::ports::login_flow::{LoginError, LoginFlow};
use chatcheck_domain::{Channel, CredentialArtifact, CredentialRecord};
use tracing::debug;

/// Login flow reading the channel's markers from environment variables.
pub struct EnvLoginFlow {
    channel: Channel,
    /// (marker name, environment variable) pairs.
    vars: Vec<(String, String)>,
}

impl EnvLoginFlow {
    /// Default variable mapping for a channel: marker `xs` for channel
    /// `facebook` reads `CHATCHECK_FACEBOOK_XS`, and so on.
    pub fn for_channel(channel: Channel) -> Self {
        let vars = channel
            .required_markers()
            .iter()
            .map(|marker| {
                (
                    marker.to_string(),
                    format!(
                        "CHATCHECK_{}_{}",
                        channel.to_string().to_uppercase(),
                        marker.to_uppercase()
                    ),
                )
            })
            .collect();
        Self { channel, vars }
    }

    /// Explicit (marker, variable) mapping.
    pub fn with_vars(channel: Channel, vars: Vec<(String, String)>) -> Self {
        Self { channel, vars }
    }
}

#[async_trait]
impl LoginFlow for EnvLoginFlow {
    async fn login(&self) -> Result<CredentialArtifact, LoginError> {
        let mut records = Vec::with_capacity(self.vars.len());
        for (marker, var) in &self.vars {
            match std::env::var(var) {
                Ok(value) if !value.trim().is_empty() => {
                    debug!(marker = marker.as_str(), "credential marker read from environment");
                    records.push(CredentialRecord::new(marker.clone(), value));
                }
                _ => {
                    return Err(LoginError::MissingCredentials(format!(
                        "{} (for {} marker {:?})",
                        var, self.channel, marker
                    )));
                }
            }
        }
        Ok(CredentialArtifact::new(records))
    }
}
