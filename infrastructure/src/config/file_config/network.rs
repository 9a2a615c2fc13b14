//! Agent network configuration from TOML (`[network]` section)

use panel_application::network::DEFAULT_LOG_CAPACITY;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNetworkConfig {
    /// Entries kept in the insight and communication logs
    pub log_capacity: usize,
}

impl Default for FileNetworkConfig {
    fn default() -> Self {
        Self {
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}
