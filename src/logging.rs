//! File logging bootstrap.
//!
//! Log lines are `key=value` event records (`event=... module=... status=...`)
//! written through the `log` facade. The backend is a size-rotated file
//! logger started at most once per process.

use std::path::{Path, PathBuf};

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;

use crate::error::{ShajraError, ShajraResult};

const LOG_FILE_BASENAME: &str = "shajra";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Starts file logging. Repeating the call with the same level and directory
/// is a no-op; a different level or directory is rejected.
pub fn init_logging(level: &str, log_dir: &Path) -> ShajraResult<()> {
    let level = normalize_level(level)?;
    let log_dir = log_dir.to_path_buf();

    let state = LOGGING_STATE.get_or_try_init(|| -> ShajraResult<LoggingState> {
        std::fs::create_dir_all(&log_dir)?;

        let logger = Logger::try_with_str(level)
            .map_err(|e| ShajraError::Other(format!("invalid log level `{}`: {}", level, e)))?
            .log_to_file(
                FileSpec::default()
                    .directory(log_dir.as_path())
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|e| ShajraError::Other(format!("failed to start logger: {}", e)))?;

        info!(
            "event=app_start module=logging status=ok version={} level={} log_dir={}",
            env!("CARGO_PKG_VERSION"),
            level,
            log_dir.display()
        );

        Ok(LoggingState {
            level,
            log_dir: log_dir.clone(),
            _logger: logger,
        })
    })?;

    if state.log_dir != log_dir || state.level != level {
        return Err(ShajraError::Other(format!(
            "logging already initialized with level `{}` at `{}`",
            state.level,
            state.log_dir.display()
        )));
    }
    Ok(())
}

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn normalize_level(level: &str) -> ShajraResult<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(ShajraError::Other(format!(
            "unsupported log level `{}`; expected trace|debug|info|warn|error",
            other
        ))),
    }
}
