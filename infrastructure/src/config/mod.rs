//! Configuration file loading for agent-panel
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `AGENT_PANEL_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./panel.toml` or `./.panel.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/agent-panel/config.toml`
//! 5. Fallback: `~/.config/agent-panel/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileConfig, FileConsensusConfig, FileDebateConfig, FileLoggingConfig,
    FileNetworkConfig, FileOrchestratorConfig, Severity,
};
pub use loader::{ConfigError, ConfigLoader};
