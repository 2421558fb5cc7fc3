//! Configuration loading for chatcheck
//!
//! File I/O and merging of configuration from multiple sources. Priority
//! order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Environment variables prefixed `CHATCHECK_`
//! 3. Project root: `./chatcheck.toml` or `./.chatcheck.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileChannelsConfig, FileConfig, FileDataConfig, FileFacebookConfig, FileInstagramConfig,
    FileReportConfig, FileScoringConfig, FileSessionsConfig, FileTelegramConfig,
    FileTransportConfig, FileWebchatConfig,
};
pub use loader::{ConfigError, ConfigLoader, RunConfig, ScoringConfig, TransportConfig};
