pub mod doctor;
pub mod init;
pub mod query;
pub mod replay;
pub mod watch;

use std::path::Path;

use sysbars_core::config::{self, BarRule};

/// Loads bar rules from `path`, or from the config directory when `None`.
///
/// An explicit path must exist and parse; the default location falls
/// back to no rules.
pub fn load_rules(path: Option<&Path>) -> Vec<BarRule> {
    match path {
        Some(path) => match config::try_load_rules_from(path) {
            Ok(rules) => rules,
            Err(e) => fail(&e),
        },
        None => config::load_rules(),
    }
}

/// Prints an error and exits with status 1.
pub fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}
