//! CLI entrypoint for chatcheck
//!
//! This is the main binary that wires together all layers using
//! dependency injection.
//!
//! Exit codes: 0 success, 1 run failure, 2 configuration error,
//! 3 session establishment failure.

use anyhow::Result;
use chatcheck_application::{
    NoProgress, NoRenderer, ReportRenderer, RunError, RunProgress, RunTestInput, RunTestUseCase,
    SessionManager,
};
use chatcheck_domain::{Channel, Report};
use chatcheck_infrastructure::{
    gateway_for, ConfigLoader, EnvLoginFlow, FsSessionRepository, HtmlSnapshotRenderer,
    HttpRelayTransport, HttpScoringGateway, JsonReportStore, PlanLoader, ReportLayout, RunConfig,
};
use chatcheck_presentation::{Cli, ConsoleFormatter, ProgressReporter};
use clap::Parser;
use std::process::exit;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const EXIT_RUN_FAILED: i32 = 1;
const EXIT_CONFIG: i32 = 2;
const EXIT_SESSION: i32 = 3;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let run_config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            exit(EXIT_CONFIG);
        }
    };

    let run_id = uuid::Uuid::new_v4().to_string();
    let layout = ReportLayout::new(&run_config.report_base, &run_config.run_name, &run_id);

    // Console logging from -v counts; full debug log next to the report.
    let _log_guard = init_logging(cli.verbose, &layout)?;
    info!(run_id = run_id.as_str(), channel = %run_config.channel, "starting chatcheck");

    let plan = match PlanLoader::with_question_prefix(&run_config.question_prefix)
        .load(&run_config.plan_path)
    {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("Test plan error: {:#}", e);
            exit(EXIT_CONFIG);
        }
    };

    // === Dependency Injection ===
    let (send_url, poll_url) = match (
        &run_config.transport.send_url,
        &run_config.transport.poll_url,
    ) {
        (Some(send), Some(poll)) => (send.clone(), poll.clone()),
        _ => {
            eprintln!("Configuration error: [transport] send_url and poll_url are required");
            exit(EXIT_CONFIG);
        }
    };
    let connector = Arc::new(HttpRelayTransport::connector(
        send_url,
        poll_url,
        run_config.target.clone(),
    ));
    let mut channel_gateway = gateway_for(run_config.channel, connector);
    if run_config.channel.supports_artifacts() {
        channel_gateway = channel_gateway.with_artifact_dir(layout.screenshot_dir());
    }
    let gateway = Arc::new(channel_gateway);
    let scoring = Arc::new(HttpScoringGateway::new(&run_config.scoring));
    let store = Arc::new(JsonReportStore::new(&layout));

    let renderer: Arc<dyn ReportRenderer> = if cli.no_render {
        Arc::new(NoRenderer)
    } else {
        Arc::new(HtmlSnapshotRenderer::new(&layout))
    };

    let progress: Arc<dyn RunProgress> = if cli.quiet {
        Arc::new(NoProgress)
    } else {
        Arc::new(ProgressReporter::new(plan.question_count()))
    };

    let mut use_case = RunTestUseCase::new(gateway, scoring, store)
        .with_renderer(renderer)
        .with_progress(progress);

    if run_config.channel.needs_session() {
        let repository = Arc::new(FsSessionRepository::new(&run_config.sessions_dir));
        let login = Arc::new(EnvLoginFlow::for_channel(run_config.channel));
        use_case = use_case.with_session_manager(Arc::new(SessionManager::new(
            repository,
            login,
            run_config.channel,
        )));
    }

    let input = RunTestInput::new(
        plan,
        run_config.channel,
        run_config.target.clone(),
        run_config.tester.clone(),
        run_id,
    )
    .with_greeting(run_config.greeting.clone());

    let outcome = match use_case.execute(input).await {
        Ok(outcome) => outcome,
        Err(e @ RunError::Session(_)) => {
            eprintln!("Session error: {:#}", e);
            exit(EXIT_SESSION);
        }
        Err(e) => {
            eprintln!("Run failed: {:#}", e);
            exit(EXIT_RUN_FAILED);
        }
    };

    let json_path = layout.json_document();
    let summary = std::fs::read_to_string(&json_path)
        .ok()
        .and_then(|raw| serde_json::from_str::<Report>(&raw).ok())
        .and_then(|report| report.summary().cloned());
    let html_path = (!cli.no_render).then(|| layout.html_document());

    println!(
        "{}",
        ConsoleFormatter::format(&outcome, summary.as_ref(), &json_path, html_path.as_deref())
    );

    Ok(())
}

/// Merge config sources and apply CLI overrides.
fn resolve_config(cli: &Cli) -> Result<RunConfig> {
    let mut file = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    if let Some(data) = &cli.data {
        file.data.plan = data.to_string_lossy().into_owned();
    }
    if let Some(tester) = &cli.tester {
        file.tester = tester.clone();
    }
    if let Some(greeting) = &cli.greeting {
        file.greeting = greeting.clone();
    }
    if let Some(run_name) = &cli.run_name {
        file.report.name = Some(run_name.clone());
    }

    let channel_override = match &cli.channel {
        Some(raw) => Some(
            raw.parse::<Channel>()
                .map_err(|_| anyhow::anyhow!("unknown channel {:?}", raw))?,
        ),
        None => None,
    };

    Ok(RunConfig::resolve(&file, channel_override)?)
}

/// Console logging from the verbosity level plus a persistent debug log
/// under the run's log directory. The returned guard flushes the file
/// writer on drop.
fn init_logging(
    verbose: u8,
    layout: &ReportLayout,
) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let console_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let log_dir = layout.log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::never(&log_dir, "run.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(console_level)),
                ),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer)
                .with_filter(EnvFilter::new("debug")),
        )
        .init();

    Ok(guard)
}
