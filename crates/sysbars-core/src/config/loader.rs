use std::path::{Path, PathBuf};

use super::{BarRule, Config, validate_rules};

/// Returns the config directory: `~/.config/sysbars/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("sysbars"))
}

/// Returns the config file path: `~/.config/sysbars/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Returns the bar rules file path: `~/.config/sysbars/bar-rules.toml`.
pub fn rules_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("bar-rules.toml"))
}

/// Tries to load and parse `config.toml`.
///
/// Returns `Ok(Config)` on success, or an error string describing
/// what went wrong (IO error, parse error, etc.).
pub fn try_load() -> Result<Config, String> {
    let path = config_path().ok_or("could not determine config path")?;
    let content = std::fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))?;
    let mut config: Config =
        toml::from_str(&content).map_err(|e| format!("{}: {e}", path.display()))?;
    config.validate();
    Ok(config)
}

/// Loads the configuration from disk, falling back to defaults.
///
/// After loading, values are clamped to safe ranges via [`Config::validate`].
/// Non-existent files silently return defaults; other errors are printed.
pub fn load() -> Config {
    load_or_default(try_load, Config::default)
}

/// Tries to load and parse `bar-rules.toml` from the config directory.
pub fn try_load_rules() -> Result<Vec<BarRule>, String> {
    let path = rules_path().ok_or("could not determine rules path")?;
    try_load_rules_from(&path)
}

/// Tries to load and parse a bar rules file at `path`.
pub fn try_load_rules_from(path: &Path) -> Result<Vec<BarRule>, String> {
    let content = std::fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    validate_rules(&content).map_err(|e| format!("{}: {e}", path.display()))
}

/// Loads bar rules from `~/.config/sysbars/bar-rules.toml`.
///
/// Falls back to no rules if the file is missing or invalid.
pub fn load_rules() -> Vec<BarRule> {
    load_or_default(try_load_rules, Vec::new)
}

/// Loads bar rules from `path`, falling back to no rules.
pub fn load_rules_from(path: &Path) -> Vec<BarRule> {
    load_or_default(|| try_load_rules_from(path), Vec::new)
}

/// Loads a config value from disk, falling back to defaults.
///
/// Non-existent files silently return defaults; other errors are printed.
fn load_or_default<T>(try_load: impl FnOnce() -> Result<T, String>, default: impl Fn() -> T) -> T {
    match try_load() {
        Ok(val) => val,
        Err(e) if is_file_not_found(&e) => default(),
        Err(e) => {
            crate::log_warn!("{e}");
            eprintln!("Warning: {e}");
            default()
        }
    }
}

/// Returns true if the error message indicates a missing file.
fn is_file_not_found(e: &str) -> bool {
    e.contains("No such file or directory")
        || e.contains("cannot find the path")
        || e.contains("The system cannot find")
}
