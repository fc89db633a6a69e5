mod loader;
pub mod rules;
pub mod template;

use serde::{Deserialize, Serialize};

use crate::log::{LogConfig, MAX_BACKUPS};

pub use loader::{
    config_dir, config_path, load, load_rules, load_rules_from, rules_path, try_load,
    try_load_rules, try_load_rules_from,
};
pub use rules::{BarRule, decide, rule_warnings, validate_rules};

/// Top-level configuration for sysbars.
///
/// Loaded from `~/.config/sysbars/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File logging settings.
    pub logging: LogConfig,
    /// Policy file watcher settings.
    pub watch: WatchConfig,
}

/// Settings for the bar rules file watcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Interval between modification-time checks, in milliseconds.
    pub poll_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { poll_ms: 1000 }
    }
}

impl Config {
    /// Clamps values to safe ranges.
    pub fn validate(&mut self) {
        self.watch.poll_ms = self.watch.poll_ms.clamp(100, 60_000);
        self.logging.max_file_mb = self.logging.max_file_mb.min(1024);
        self.logging.backups = self.logging.backups.clamp(1, MAX_BACKUPS);
    }
}
