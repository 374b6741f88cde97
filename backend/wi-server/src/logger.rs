use crate::error::{Result as ServerErrorResult, ServerError};

use std::fmt::Arguments;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record, info};

/// Initialize logger with fern
///
/// stdout carries MCP frames, so console output always goes to stderr.
///
/// # Arguments
/// * `log_level` - Log level filter
/// * `log_file` - Optional path to log file. None = stderr, Some = file output
/// * `colored` - Enable colored output (ignored when logging to file)
#[track_caller]
pub fn initialize(
    log_level: wi_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let level_filter = log_level.0;

    let base_dispatch = Dispatch::new()
        .level(level_filter)
        .level_for("sqlx", level_filter.min(LevelFilter::Warn));

    let dispatch = match &log_file {
        Some(log_path) => Dispatch::new()
            .format(plain)
            .chain(open_log_file(log_path)?),
        None if colored => {
            let colors = ColoredLevelConfig::new()
                .trace(Color::Magenta)
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);

            Dispatch::new()
                .format(move |out, message, record| {
                    write_line(out, colors.color(record.level()), message, record)
                })
                .chain(std::io::stderr())
        }
        // Plain output for non-TTY (pipes, supervisors)
        None => Dispatch::new().format(plain).chain(std::io::stderr()),
    };

    base_dispatch
        .chain(dispatch)
        .apply()
        .map_err(|e| ServerError::logger(format!("Failed to initialize logger: {e}")))?;

    match &log_file {
        Some(path) => info!(
            "Logger initialized: level={:?}, file={}",
            level_filter,
            path.display()
        ),
        None => info!("Logger initialized: level={:?}, stderr", level_filter),
    }

    // Bridge tracing to log
    tracing_log::LogTracer::init().ok();

    Ok(())
}

fn plain(out: FormatCallback, message: &Arguments, record: &Record) {
    write_line(out, record.level(), message, record)
}

fn write_line(
    out: FormatCallback,
    level: impl std::fmt::Display,
    message: &Arguments,
    record: &Record,
) {
    out.finish(format_args!(
        "[{date} - {level}] {message} [{file}:{line}]",
        date = humantime::format_rfc3339(SystemTime::now()),
        file = record.file().unwrap_or("unknown"),
        line = record.line().unwrap_or(0),
    ))
}

/// Open `path` for appending, creating its directory first.
#[track_caller]
pub fn open_log_file(path: &Path) -> ServerErrorResult<std::fs::File> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| {
            ServerError::logger(format!(
                "Failed to create log directory {}: {}",
                dir.display(),
                e
            ))
        })?;
    }

    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            ServerError::logger(format!(
                "Failed to open log file {}: {}",
                path.display(),
                e
            ))
        })
}
