//! # Logging
//!
//! `tracing` subscriber setup shared by the binaries: a JSON file layer written
//! through a daily rolling appender, plus an optional ANSI console layer on
//! stderr.
//!
//! `RUST_LOG` wins over the configured level. The returned `WorkerGuard` must
//! be held for as long as file output is wanted; dropping it flushes and
//! stops the writer thread.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Existing log files kept when logging starts.
pub const KEEP_OLD_LOGS: usize = 1;

/// Why logging could not be installed.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log directory could not be created or listed.
    #[error("log directory {path}: {source}")]
    Directory {
        /// Directory in question.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The level string is not a valid filter directive.
    #[error("invalid log level `{0}`")]
    Level(String),

    /// A global subscriber is already installed.
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Builds the level filter: `RUST_LOG` if set, else `level`.
pub fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|_| LoggingError::Level(level.to_string()))
}

/// Installs the global subscriber, writing files named `{app}.log.YYYY-MM-DD`
/// into `log_dir`. With `console` set, records are mirrored to stderr.
pub fn setup_logging(log_dir: &Path, app: &str, level: &str, console: bool) -> Result<WorkerGuard, LoggingError> {
    let dir_error = |source| LoggingError::Directory {
        path: log_dir.to_path_buf(),
        source,
    };

    fs::create_dir_all(log_dir).map_err(dir_error)?;

    let file_prefix = format!("{}.log", app);
    let removed = prune_old_logs(log_dir, &file_prefix, KEEP_OLD_LOGS).map_err(dir_error)?;

    let file_appender = rolling::daily(log_dir, &file_prefix);
    let (writer, guard) = non_blocking(file_appender);

    let console_layer = console.then(|| {
        fmt::layer()
            .with_target(true)
            .with_ansi(true)
            .with_writer(io::stderr)
    });

    let file_layer = fmt::layer().with_ansi(false).with_writer(writer).json();

    tracing_subscriber::registry()
        .with(build_filter(level)?)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    info!(dir = %log_dir.display(), level, removed, "Logging initialized");
    Ok(guard)
}

/// Deletes files in `dir` whose name starts with `prefix`, keeping the
/// `keep` most recently modified. Returns how many were deleted.
pub fn prune_old_logs(dir: &Path, prefix: &str, keep: usize) -> io::Result<usize> {
    let mut logs: Vec<(SystemTime, PathBuf)> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(prefix))
        .filter_map(|entry| {
            let modified = entry.metadata().and_then(|m| m.modified()).ok()?;
            Some((modified, entry.path()))
        })
        .collect();

    // Newest first.
    logs.sort_by(|a, b| b.0.cmp(&a.0));

    let mut removed = 0;
    for (_, path) in logs.iter().skip(keep) {
        match fs::remove_file(path) {
            Ok(()) => removed += 1,
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to delete old log file"),
        }
    }
    Ok(removed)
}
