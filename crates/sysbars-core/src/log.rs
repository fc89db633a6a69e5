//! Rotating file log for reconciler activity.
//!
//! Lines go to `~/.config/sysbars/logs/sysbars.log`, optionally scoped
//! to a display:
//!
//! ```text
//! 14:03:07.412 [WARN] [display 2] failed to update requested visibilities: ...
//! ```
//!
//! Once the file reaches `max_file_mb` it is shifted to `sysbars.log.1`,
//! older backups move up by one, and anything past `backups` is dropped.
//! Until [`init`] succeeds every log macro is a no-op.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::inset::DisplayId;

static LOG: OnceLock<Mutex<FileLog>> = OnceLock::new();

const LOG_FILE_NAME: &str = "sysbars.log";

/// Most rotated files kept next to the live log.
pub const MAX_BACKUPS: u32 = 9;

/// The `[logging]` section of `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled. Defaults to `false`.
    pub enabled: bool,
    pub level: Level,
    /// Size in megabytes at which the live file is rotated.
    pub max_file_mb: u64,
    /// Rotated files to keep, `1..=MAX_BACKUPS`.
    pub backups: u32,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: Level::Info,
            max_file_mb: 10,
            backups: 1,
        }
    }
}

/// Log severity, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

/// An append-only log file that rotates itself by size.
#[derive(Debug)]
pub struct FileLog {
    file: File,
    dir: PathBuf,
    min_level: Level,
    max_bytes: u64,
    backups: u32,
    written: u64,
}

impl FileLog {
    /// Opens (or creates) `sysbars.log` in `dir` with the limits from
    /// `config`.
    pub fn open(dir: &Path, config: &LogConfig) -> io::Result<Self> {
        Self::with_limits(
            dir,
            config.level,
            config.max_file_mb.saturating_mul(1024 * 1024),
            config.backups,
        )
    }

    /// Opens the log with an explicit size limit in bytes. A limit of
    /// zero disables rotation.
    pub fn with_limits(dir: &Path, min_level: Level, max_bytes: u64, backups: u32) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let file = append(&dir.join(LOG_FILE_NAME))?;
        let written = file.metadata()?.len();
        Ok(Self {
            file,
            dir: dir.to_path_buf(),
            min_level,
            max_bytes,
            backups: backups.clamp(1, MAX_BACKUPS),
            written,
        })
    }

    /// Path of the live log file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(LOG_FILE_NAME)
    }

    /// Path of the `n`th rotated file, `1` being the newest.
    pub fn backup_path(&self, n: u32) -> PathBuf {
        self.dir.join(format!("{LOG_FILE_NAME}.{n}"))
    }

    /// Appends one line if `level` passes the filter, rotating once the
    /// size limit is reached.
    pub fn write_line(&mut self, level: Level, display: Option<DisplayId>, args: fmt::Arguments<'_>) {
        if level < self.min_level {
            return;
        }
        let line = format_line(&clock_time(SystemTime::now()), level, display, args);
        if self.file.write_all(line.as_bytes()).is_err() {
            return;
        }
        self.written += line.len() as u64;

        if self.max_bytes > 0 && self.written >= self.max_bytes {
            self.rotate();
        }
    }

    fn rotate(&mut self) {
        let _ = fs::remove_file(self.backup_path(self.backups));
        for n in (1..self.backups).rev() {
            let _ = fs::rename(self.backup_path(n), self.backup_path(n + 1));
        }
        let _ = fs::rename(self.path(), self.backup_path(1));

        // On failure keep writing to the renamed handle rather than lose lines.
        if let Ok(file) = append(&self.path()) {
            self.file = file;
            self.written = 0;
        }
    }
}

fn append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Starts the global log under `~/.config/sysbars/logs`. Call once at
/// startup.
///
/// Returns the live log path, `Ok(None)` when logging is disabled, or
/// why the file could not be opened.
pub fn init(config: &LogConfig) -> Result<Option<PathBuf>, String> {
    if !config.enabled {
        return Ok(None);
    }
    let dir = crate::config::config_dir()
        .ok_or("could not determine log directory")?
        .join("logs");
    let log = FileLog::open(&dir, config).map_err(|e| format!("{}: {e}", dir.display()))?;
    let path = log.path();
    LOG.set(Mutex::new(log))
        .map_err(|_| "logging already initialised".to_string())?;
    Ok(Some(path))
}

/// Writes to the global log. Prefer the `log_*!` macros.
pub fn write(level: Level, display: Option<DisplayId>, args: fmt::Arguments<'_>) {
    if let Some(log) = LOG.get() {
        log.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .write_line(level, display, args);
    }
}

fn format_line(now: &str, level: Level, display: Option<DisplayId>, args: fmt::Arguments<'_>) -> String {
    match display {
        Some(id) => format!("{now} [{}] [display {id}] {args}\n", level.tag()),
        None => format!("{now} [{}] {args}\n", level.tag()),
    }
}

/// UTC wall-clock time of day with milliseconds.
fn clock_time(at: SystemTime) -> String {
    let since_epoch = at.duration_since(UNIX_EPOCH).unwrap_or_default();
    let secs = since_epoch.as_secs() % 86_400;
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        secs / 3600,
        secs / 60 % 60,
        secs % 60,
        since_epoch.subsec_millis()
    )
}

/// Logs at DEBUG level. Prefix with `display = id;` to scope the line.
#[macro_export]
macro_rules! log_debug {
    (display = $id:expr; $($arg:tt)*) => {
        $crate::log::write($crate::log::Level::Debug, Some($id), format_args!($($arg)*))
    };
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Debug, None, format_args!($($arg)*)) };
}

/// Logs at INFO level. Prefix with `display = id;` to scope the line.
#[macro_export]
macro_rules! log_info {
    (display = $id:expr; $($arg:tt)*) => {
        $crate::log::write($crate::log::Level::Info, Some($id), format_args!($($arg)*))
    };
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Info, None, format_args!($($arg)*)) };
}

/// Logs at WARN level. Prefix with `display = id;` to scope the line.
#[macro_export]
macro_rules! log_warn {
    (display = $id:expr; $($arg:tt)*) => {
        $crate::log::write($crate::log::Level::Warn, Some($id), format_args!($($arg)*))
    };
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Warn, None, format_args!($($arg)*)) };
}

/// Logs at ERROR level. Prefix with `display = id;` to scope the line.
#[macro_export]
macro_rules! log_error {
    (display = $id:expr; $($arg:tt)*) => {
        $crate::log::write($crate::log::Level::Error, Some($id), format_args!($($arg)*))
    };
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Error, None, format_args!($($arg)*)) };
}
