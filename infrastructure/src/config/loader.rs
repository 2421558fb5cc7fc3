//! Configuration loader with multi-source merging and run resolution

use super::file_config::{FileConfig, FileScoringConfig};
use chatcheck_domain::Channel;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Unknown channel: {0:?}")]
    UnknownChannel(String),

    #[error("No target configured for channel {0} (set [channels.{0}] in chatcheck.toml)")]
    MissingTarget(Channel),

    #[error("No scoring endpoint configured (set [scoring] endpoint)")]
    MissingScoringEndpoint,
}

/// Resolved scoring service settings.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub judge: String,
}

/// Resolved relay transport settings; `None` when unset, in which case an
/// external transport connector must be wired in.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub send_url: Option<String>,
    pub poll_url: Option<String>,
}

/// Validated configuration for one run, resolved from a [`FileConfig`].
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub channel: Channel,
    /// Channel-specific conversation target (URL, bot username, page id).
    pub target: String,
    pub tester: String,
    pub greeting: String,
    /// Report file stem; plan file stem when not configured.
    pub run_name: String,
    pub plan_path: PathBuf,
    pub question_prefix: String,
    pub report_base: PathBuf,
    pub sessions_dir: PathBuf,
    pub scoring: ScoringConfig,
    pub transport: TransportConfig,
}

impl RunConfig {
    /// Resolve a raw file configuration into a runnable one. The channel
    /// override (from the CLI) wins over the configured channel.
    pub fn resolve(
        file: &FileConfig,
        channel_override: Option<Channel>,
    ) -> Result<Self, ConfigError> {
        let channel = match channel_override {
            Some(channel) => channel,
            None => file
                .channel
                .parse()
                .map_err(|_| ConfigError::UnknownChannel(file.channel.clone()))?,
        };

        let target = match channel {
            Channel::Webchat => file.channels.webchat.url.clone(),
            Channel::Telegram => file.channels.telegram.bot_username.clone(),
            Channel::Instagram => file.channels.instagram.username.clone(),
            Channel::Facebook => file.channels.facebook.page_id.clone(),
        }
        .filter(|t| !t.trim().is_empty())
        .ok_or(ConfigError::MissingTarget(channel))?;

        let plan_path = PathBuf::from(&file.data.plan);
        let run_name = match &file.report.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => plan_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "run".to_string()),
        };

        Ok(Self {
            channel,
            target,
            tester: file.tester.clone(),
            greeting: file.greeting.clone(),
            run_name,
            plan_path,
            question_prefix: file.data.question_prefix.clone(),
            report_base: PathBuf::from(&file.report.dir),
            sessions_dir: PathBuf::from(&file.sessions.dir),
            scoring: resolve_scoring(&file.scoring)?,
            transport: TransportConfig {
                send_url: file.transport.send_url.clone(),
                poll_url: file.transport.poll_url.clone(),
            },
        })
    }
}

fn resolve_scoring(scoring: &FileScoringConfig) -> Result<ScoringConfig, ConfigError> {
    let endpoint = scoring
        .endpoint
        .clone()
        .filter(|e| !e.trim().is_empty())
        .ok_or(ConfigError::MissingScoringEndpoint)?;
    Ok(ScoringConfig {
        endpoint,
        api_key: scoring.api_key.clone(),
        judge: scoring.judge.clone(),
    })
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Environment variables prefixed `CHATCHECK_` (`__` nests sections)
    /// 3. Project root: `./chatcheck.toml` or `./.chatcheck.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for filename in &["chatcheck.toml", ".chatcheck.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                break;
            }
        }

        figment = figment.merge(Env::prefixed("CHATCHECK_").split("__"));

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }
}
