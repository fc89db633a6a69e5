/// Generates the default `config.toml` contents with explanatory comments.
///
/// This is used by `sysbars init` to create a starter config file that
/// users can immediately edit.
pub fn generate_config() -> String {
    r##"# sysbars configuration
# Location: ~/.config/sysbars/config.toml

[logging]
# Enable file logging to ~/.config/sysbars/logs/sysbars.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Rotate the log once it reaches this size in MB.
max_file_mb = 10
# Rotated files to keep (sysbars.log.1 is the newest), 1 to 9.
backups = 1

[watch]
# How often `sysbars watch` checks bar-rules.toml for changes (ms).
poll_ms = 1000
"##
    .to_string()
}

/// Generates the default `bar-rules.toml` contents with explanatory comments.
pub fn generate_rules() -> String {
    r#"# Bar visibility rules for sysbars
# Location: ~/.config/sysbars/bar-rules.toml
#
# Each rule forces system bars shown or hidden while a package holds
# the top focused window on a display. Rules are evaluated in order and
# the first matching rule wins. A package with no matching rule keeps
# whatever bars the platform shows.
#
# match_package: an exact package name, or "*" for every package.
# show / hide:   inset types, any of
#   status_bars, navigation_bars, caption_bar, system_gestures,
#   mandatory_system_gestures, tappable_element, display_cutout
#
# The ime type is owned by the input method and is always ignored.

# Keep the launcher's bars untouched even when a "*" rule follows.
# [[rule]]
# match_package = "com.android.launcher"

# Immersive video: hide both bars.
# [[rule]]
# match_package = "com.example.video"
# hide = ["status_bars", "navigation_bars"]

# Hide the navigation bar for every other app.
# [[rule]]
# match_package = "*"
# hide = ["navigation_bars"]
"#
    .to_string()
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
