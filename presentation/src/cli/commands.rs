//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for deliberation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with every phase and round
    Full,
    /// Only the recommendation (or consensus) and key metrics
    Summary,
    /// JSON output
    Json,
}

/// CLI arguments for agent-panel
#[derive(Parser, Debug)]
#[command(name = "agent-panel")]
#[command(author, version, about = "Agent panel - specialist agents deliberate on support cases")]
#[command(long_about = r#"
Agent Panel runs a panel of specialist agents over a support case.

A deliberation has these phases:
1. Analysis: customer insight, pattern and compliance agents analyze in parallel
2. Debate (optional): runs when the analyses disagree
3. Solution: the solution architect designs a resolution
4. Follow-up: the proactive agent plans follow-up and prevention
5. Synthesis: one recommendation with confidence and escalation flag

Judgments are replayed from a script file mapping role names to responses.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./panel.toml        Project-level config
3. ~/.config/agent-panel/config.toml   Global config

Example:
  agent-panel deliberate --case case.json --script judgments.json
  agent-panel debate --topic "Refund T-1?" --agent PatternAnalyst --agent ComplianceGuardian --script judgments.json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full phased deliberation on a case file
    Deliberate(DeliberateArgs),
    /// Run a bounded debate between agents on a topic
    Debate(DebateArgs),
}

#[derive(Args, Debug)]
pub struct DeliberateArgs {
    /// Case file (JSON: id, title, description, subject, prior_messages)
    #[arg(long, value_name = "PATH")]
    pub case: PathBuf,

    /// Judgment script (JSON: role name -> responses)
    #[arg(long, value_name = "PATH")]
    pub script: PathBuf,

    /// Debate when analysis stances diverge (overrides config)
    #[arg(long)]
    pub debate: bool,
}

#[derive(Args, Debug)]
pub struct DebateArgs {
    /// Topic the agents debate
    #[arg(long)]
    pub topic: String,

    /// Participating roles (repeatable); defaults to the analysis agents
    #[arg(long = "agent", value_name = "ROLE")]
    pub agents: Vec<String>,

    /// Judgment script (JSON: role name -> responses)
    #[arg(long, value_name = "PATH")]
    pub script: PathBuf,

    /// Maximum rounds (overrides config)
    #[arg(long)]
    pub max_rounds: Option<usize>,

    /// Consensus threshold in (0, 1] (overrides config)
    #[arg(long)]
    pub threshold: Option<f64>,
}
