//! Logging configuration from TOML (`[logging]` section)
//!
//! ```toml
//! [logging]
//! dir = "~/.local/share/agent-panel/logs"   # rolling diagnostic logs
//! audit_log = "audit.jsonl"                 # JSONL audit events
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for daily-rolling diagnostic log files
    pub dir: Option<String>,
    /// JSONL audit event file
    pub audit_log: Option<String>,
}

impl FileLoggingConfig {
    pub fn log_dir(&self) -> Option<PathBuf> {
        self.dir.as_deref().map(expand_home)
    }

    pub fn audit_log_path(&self) -> Option<PathBuf> {
        self.audit_log.as_deref().map(expand_home)
    }
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
