//! Expiry sweeper configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Schedule for the background task that purges expired refresh tokens
/// and revoked access-token entries
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SweeperConfig {
    pub enabled: bool,

    /// Seconds between sweeps
    pub interval_secs: u64,

    /// Upper bound for a single sweep, in seconds
    pub tick_timeout_secs: u64,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 3600, // hourly
            tick_timeout_secs: 30,
        }
    }
}

impl SweeperConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn tick_timeout(&self) -> Duration {
        Duration::from_secs(self.tick_timeout_secs)
    }
}
