//! Watches the bar rules file and swaps reloaded rules into a
//! [`SharedPolicy`].
//!
//! The file's modification time is polled. When it changes the file is
//! re-read; only content that parses replaces the active rules, so a
//! half-saved edit never wipes them. A deleted file means no rules.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime};

use sysbars_core::SharedPolicy;
use sysbars_core::config;

pub struct PolicyWatcher {
    path: PathBuf,
    policy: Arc<SharedPolicy>,
    mtime: Option<SystemTime>,
    poll: Duration,
}

impl PolicyWatcher {
    /// Creates a watcher for `path`. The current file is taken as already
    /// loaded; only later changes trigger a reload.
    pub fn new(path: PathBuf, policy: Arc<SharedPolicy>, poll: Duration) -> Self {
        let mtime = mtime(&path);
        Self {
            path,
            policy,
            mtime,
            poll,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reloads the rules if the file changed since the last check.
    ///
    /// Returns the new rule count when the rules were replaced.
    pub fn check_and_reload(&mut self) -> Option<usize> {
        let current = mtime(&self.path);
        if current == self.mtime {
            return None;
        }
        self.mtime = current;

        if current.is_none() {
            sysbars_core::log_info!("{} removed, clearing bar rules", self.path.display());
            self.policy.replace(Vec::new());
            return Some(0);
        }

        match config::try_load_rules_from(&self.path) {
            Ok(rules) => {
                for warning in config::rule_warnings(&rules) {
                    sysbars_core::log_warn!("{}: {warning}", self.path.display());
                }
                let count = rules.len();
                self.policy.replace(rules);
                sysbars_core::log_info!("reloaded {count} bar rule(s)");
                Some(count)
            }
            Err(e) => {
                sysbars_core::log_warn!("keeping previous bar rules: {e}");
                None
            }
        }
    }

    /// Polls until `stop` is set, calling `on_reload` with the new rule
    /// count after every successful reload.
    pub fn watch(mut self, stop: &AtomicBool, mut on_reload: impl FnMut(usize)) {
        sysbars_core::log_info!("watching {}", self.path.display());
        while !stop.load(Ordering::Relaxed) {
            std::thread::sleep(self.poll);
            if stop.load(Ordering::Relaxed) {
                break;
            }
            if let Some(count) = self.check_and_reload() {
                on_reload(count);
            }
        }
    }
}

fn mtime(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
