//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for chatcheck
#[derive(Parser, Debug)]
#[command(name = "chatcheck")]
#[command(author, version, about = "Cross-channel regression harness for conversational agents")]
#[command(long_about = r#"
Chatcheck replays a test plan of question/expected-answer pairs against a
deployed conversational agent over one channel (webchat, telegram, instagram
or facebook), scores each actual reply, and writes an incremental JSON +
HTML report that survives crashes mid-run.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. CHATCHECK_* environment variables
3. ./chatcheck.toml    Project-level config

Example:
  chatcheck --channel webchat --data data/faq.json
  chatcheck --channel telegram --tester qa-team --run-name nightly
"#)]
pub struct Cli {
    /// Channel to run against (overrides the configured channel)
    #[arg(short = 'c', long, value_name = "CHANNEL")]
    pub channel: Option<String>,

    /// Path to the converted test plan JSON (overrides [data] plan)
    #[arg(short, long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Tester identity recorded into the report
    #[arg(short, long, value_name = "NAME")]
    pub tester: Option<String>,

    /// Greeting sent once before the first topic
    #[arg(long, value_name = "TEXT")]
    pub greeting: Option<String>,

    /// Report file stem (defaults to the plan file stem)
    #[arg(long, value_name = "NAME")]
    pub run_name: Option<String>,

    /// Skip HTML rendering; only the JSON document is written
    #[arg(long)]
    pub no_render: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,
}
