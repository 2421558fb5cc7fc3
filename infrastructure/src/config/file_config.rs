//! Raw TOML configuration data types
//!
//! These structs mirror the exact structure of the TOML config file and are
//! deserialized directly. Resolution into a validated run configuration
//! happens in [`super::loader`].

use serde::{Deserialize, Serialize};

/// Per-channel conversation targets.
///
/// Each channel addresses its counterpart differently: the webchat widget by
/// URL, the Telegram bot by username, Instagram by account, Facebook by page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChannelsConfig {
    pub webchat: FileWebchatConfig,
    pub telegram: FileTelegramConfig,
    pub instagram: FileInstagramConfig,
    pub facebook: FileFacebookConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWebchatConfig {
    /// URL of the page hosting the chat widget.
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTelegramConfig {
    /// Username of the bot under test (without `@`).
    pub bot_username: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInstagramConfig {
    /// Account name of the business profile under test.
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFacebookConfig {
    /// Page id of the page under test.
    pub page_id: Option<String>,
}

/// Test data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDataConfig {
    /// Path to the converted test plan JSON.
    pub plan: String,
    /// Prefix of question columns in the plan rows.
    pub question_prefix: String,
}

impl Default for FileDataConfig {
    fn default() -> Self {
        Self {
            plan: "data/plan.json".to_string(),
            question_prefix: "question".to_string(),
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReportConfig {
    /// Base directory holding the `json/`, `html/` and `screenshot/` trees.
    pub dir: String,
    /// Run name override; defaults to the plan file stem.
    pub name: Option<String>,
}

impl Default for FileReportConfig {
    fn default() -> Self {
        Self {
            dir: "report".to_string(),
            name: None,
        }
    }
}

/// Session storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionsConfig {
    /// Directory holding per-session credential subdirectories.
    pub dir: String,
}

impl Default for FileSessionsConfig {
    fn default() -> Self {
        Self {
            dir: "sessions".to_string(),
        }
    }
}

/// Scoring service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileScoringConfig {
    /// Scoring endpoint URL.
    pub endpoint: Option<String>,
    /// Bearer key sent with every scoring request.
    pub api_key: Option<String>,
    /// Judge identity recorded into every judgment.
    pub judge: String,
}

impl Default for FileScoringConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            judge: "llm-judge".to_string(),
        }
    }
}

/// Built-in HTTP relay transport settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTransportConfig {
    pub send_url: Option<String>,
    pub poll_url: Option<String>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Channel to run against (webchat, telegram, instagram, facebook).
    pub channel: String,
    /// Tester identity recorded into the report.
    pub tester: String,
    /// Greeting sent once before the first topic.
    pub greeting: String,
    pub channels: FileChannelsConfig,
    pub data: FileDataConfig,
    pub report: FileReportConfig,
    pub sessions: FileSessionsConfig,
    pub scoring: FileScoringConfig,
    pub transport: FileTransportConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            channel: "webchat".to_string(),
            tester: "chatcheck".to_string(),
            greeting: "Hello".to_string(),
            channels: FileChannelsConfig::default(),
            data: FileDataConfig::default(),
            report: FileReportConfig::default(),
            sessions: FileSessionsConfig::default(),
            scoring: FileScoringConfig::default(),
            transport: FileTransportConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
channel = "telegram"
tester = "qa-team"
greeting = "Hi there"

[channels.telegram]
bot_username = "support_bot"

[data]
plan = "data/faq.json"
question_prefix = "pertanyaan"

[report]
dir = "out/report"
name = "faq-regression"

[scoring]
endpoint = "https://scoring.internal/v1/judge"
judge = "gpt-judge"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.channel, "telegram");
        assert_eq!(config.tester, "qa-team");
        assert_eq!(
            config.channels.telegram.bot_username.as_deref(),
            Some("support_bot")
        );
        assert_eq!(config.data.question_prefix, "pertanyaan");
        assert_eq!(config.report.name.as_deref(), Some("faq-regression"));
        assert_eq!(config.scoring.judge, "gpt-judge");
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[channels.webchat]
url = "https://example.com/chat"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        // Defaults should apply
        assert_eq!(config.channel, "webchat");
        assert_eq!(config.data.plan, "data/plan.json");
        assert_eq!(config.sessions.dir, "sessions");
        assert_eq!(
            config.channels.webchat.url.as_deref(),
            Some("https://example.com/chat")
        );
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.channel, "webchat");
        assert_eq!(config.report.dir, "report");
        assert!(config.scoring.endpoint.is_none());
    }
}
