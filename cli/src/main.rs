//! CLI entrypoint for agent-panel
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use panel_application::{
    AgentNetwork, AgentRoster, CompositeEventSink, EventSink, OrchestratorConfig, RunDebateInput,
    RunDebateUseCase, RunDeliberationUseCase,
};
use panel_domain::AgentRole;
use panel_infrastructure::{
    CaseLoader, ConfigLoader, FileConfig, JsonlEventLogger, ReplayInferenceGateway,
};
use panel_presentation::{
    Cli, Command, ConsoleFormatter, DebateArgs, DeliberateArgs, OutputFormat, ProgressReporter,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("failed to load configuration")?
    };

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, &file_config);

    info!("Starting agent-panel");

    let (config, issues) = file_config.to_orchestrator_config();
    let mut has_errors = false;
    for issue in &issues {
        eprintln!("{}", issue);
        has_errors |= issue.is_error();
    }
    if has_errors {
        bail!("configuration has errors");
    }

    let Some(command) = cli.command else {
        bail!("No command given. Use `agent-panel deliberate` or `agent-panel debate`.");
    };

    // Audit log is optional; a file that cannot be opened is reported and skipped
    let audit_log = file_config
        .logging
        .audit_log_path()
        .and_then(JsonlEventLogger::new);
    let progress = ProgressReporter::new();
    let mut sinks: Vec<&dyn EventSink> = Vec::new();
    if !cli.quiet {
        sinks.push(&progress);
    }
    if let Some(logger) = &audit_log {
        info!("Writing audit log to {}", logger.path().display());
        sinks.push(logger);
    }
    let events = CompositeEventSink::new(sinks);

    let network = Arc::new(AgentNetwork::with_capacity(
        file_config.network.log_capacity.max(1),
    ));

    let output = match command {
        Command::Deliberate(args) => {
            deliberate(args, config, network, &events, cli.output).await?
        }
        Command::Debate(args) => debate(args, config, network, &events, cli.output).await?,
    };

    println!("{}", output);

    Ok(())
}

fn init_logging(verbose: u8, config: &FileConfig) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match config.logging.log_dir() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "agent-panel.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}

async fn deliberate(
    args: DeliberateArgs,
    mut config: OrchestratorConfig,
    network: Arc<AgentNetwork>,
    events: &dyn EventSink,
    output: OutputFormat,
) -> Result<String> {
    if args.debate {
        config.enable_debate = true;
    }

    let case = CaseLoader::load(&args.case)?;
    let gateway = Arc::new(ReplayInferenceGateway::from_file(&args.script)?);

    // === Dependency Injection ===
    let roster = AgentRoster::specialists(gateway, config.temperature, config.agent_timeout);
    let use_case = RunDeliberationUseCase::new(roster, network, config)?;

    let result = use_case.execute_with_events(case, events).await?;
    if result.metrics.should_escalate {
        warn!("Case {} should be escalated to a human", result.case_id);
    }

    Ok(match output {
        OutputFormat::Full => ConsoleFormatter::format(&result),
        OutputFormat::Summary => ConsoleFormatter::format_summary(&result),
        OutputFormat::Json => ConsoleFormatter::format_json(&result),
    })
}

async fn debate(
    args: DebateArgs,
    config: OrchestratorConfig,
    network: Arc<AgentNetwork>,
    events: &dyn EventSink,
    output: OutputFormat,
) -> Result<String> {
    let roles: Vec<AgentRole> = if args.agents.is_empty() {
        config.parallel_agents.clone()
    } else {
        args.agents
            .iter()
            .map(|name| name.parse())
            .collect::<Result<_, _>>()?
    };

    let mut debate_config = config.debate;
    if let Some(max_rounds) = args.max_rounds {
        debate_config = debate_config.with_max_rounds(max_rounds);
    }
    if let Some(threshold) = args.threshold {
        debate_config = debate_config.with_consensus_threshold(threshold);
    }

    let gateway = Arc::new(ReplayInferenceGateway::from_file(&args.script)?);
    let roster = AgentRoster::specialists(gateway, config.temperature, config.agent_timeout);
    for role in &roles {
        network.register_role(*role);
    }

    let input = RunDebateInput::new(args.topic, roster.agents_for(&roles)).with_config(debate_config);
    let outcome = RunDebateUseCase::new()
        .with_network(network)
        .execute_with_events(input, events)
        .await?;

    Ok(match output {
        OutputFormat::Full => ConsoleFormatter::format_debate(&outcome),
        OutputFormat::Summary => ConsoleFormatter::format_debate_summary(&outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
    })
}
