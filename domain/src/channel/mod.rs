//! Deployment channels under test.
//!
//! A [`Channel`] names one of the fixed set of surfaces the harness can
//! drive. It is selected once at run start (tagged dispatch, never switched
//! mid-run) and carries the per-channel policy knobs: which credential
//! markers a stored session must hold, how long to wait for replies, and how
//! pass/fail is classified.

mod wait;

pub use wait::{Pacing, WaitPolicy};

use crate::core::error::DomainError;
use crate::report::VerdictPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported deployment channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Embedded web chat widget, driven through a browser page.
    Webchat,
    /// Telegram bot, driven through a user-session client.
    Telegram,
    /// Instagram direct messages.
    Instagram,
    /// Facebook Messenger fan page.
    Facebook,
}

impl Channel {
    /// All supported channels, in dispatch order.
    pub const ALL: [Channel; 4] = [
        Channel::Webchat,
        Channel::Telegram,
        Channel::Instagram,
        Channel::Facebook,
    ];

    /// Credential markers a stored session artifact must contain for this
    /// channel's authentication scheme. Empty means the channel needs no
    /// stored session (the webchat widget authenticates per-conversation).
    pub fn required_markers(&self) -> &'static [&'static str] {
        match self {
            Channel::Webchat => &[],
            Channel::Telegram => &["session"],
            Channel::Instagram => &["sessionid"],
            Channel::Facebook => &["c_user", "xs"],
        }
    }

    /// Whether this channel reuses a persisted session across runs.
    pub fn needs_session(&self) -> bool {
        !self.required_markers().is_empty()
    }

    /// Default reply wait policy for this channel.
    ///
    /// UI-driven channels answer in sub-second time and are polled tightly;
    /// the bot platforms deliver asynchronously and need a long initial
    /// grace period.
    pub fn wait_policy(&self) -> WaitPolicy {
        match self {
            Channel::Webchat => WaitPolicy::tight(),
            Channel::Telegram | Channel::Facebook => WaitPolicy::relaxed(),
            Channel::Instagram => WaitPolicy::relaxed(),
        }
    }

    /// Default pass/fail classification for this channel.
    ///
    /// Scored channels compare the gateway score against a fixed threshold;
    /// the Messenger page flow predates the scoring service and classifies
    /// by substring containment of the expected answer.
    pub fn verdict_policy(&self) -> VerdictPolicy {
        match self {
            Channel::Facebook => VerdictPolicy::Containment,
            _ => VerdictPolicy::score_threshold_default(),
        }
    }

    /// Whether the channel's adapter can capture a visual artifact.
    pub fn supports_artifacts(&self) -> bool {
        matches!(self, Channel::Webchat)
    }

    /// Whether the channel context should be reset when entering a topic,
    /// to avoid state bleed from the previous topic.
    pub fn resets_context_per_topic(&self) -> bool {
        matches!(self, Channel::Webchat)
    }

    /// Human-readable metadata recorded into the run summary.
    pub fn metadata(&self, target: &str) -> ChannelMetadata {
        match self {
            Channel::Webchat => ChannelMetadata {
                target: target.to_string(),
                surface: "Webchat Test".to_string(),
                client: "Browser".to_string(),
            },
            Channel::Telegram => ChannelMetadata {
                target: format!("Telegram Bot ({})", target),
                surface: "Telegram Test".to_string(),
                client: "Telegram Client".to_string(),
            },
            Channel::Instagram => ChannelMetadata {
                target: format!("Instagram DM (@{})", target),
                surface: "Instagram Test".to_string(),
                client: "Instagram Client".to_string(),
            },
            Channel::Facebook => ChannelMetadata {
                target: format!("Facebook Messenger ({})", target),
                surface: "Facebook Test".to_string(),
                client: "Graph API".to_string(),
            },
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Webchat => "webchat",
            Channel::Telegram => "telegram",
            Channel::Instagram => "instagram",
            Channel::Facebook => "facebook",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Channel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "webchat" => Ok(Channel::Webchat),
            "telegram" => Ok(Channel::Telegram),
            "instagram" => Ok(Channel::Instagram),
            "facebook" => Ok(Channel::Facebook),
            other => Err(DomainError::InvalidChannel(other.to_string())),
        }
    }
}

/// Channel description recorded into the run summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMetadata {
    /// The tested endpoint/identity, formatted for humans.
    pub target: String,
    /// Name of the tested surface (e.g. "Telegram Test").
    pub surface: String,
    /// Name of the driving client (e.g. "Graph API").
    pub client: String,
}
