use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

/// Colored stderr logging; stdout is reserved for command output.
pub fn initialize(verbose: bool) -> Result<(), log::SetLoggerError> {
    let level = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    Dispatch::new()
        .level(level)
        .level_for("sqlx", LevelFilter::Warn)
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message}",
                date = humantime::format_rfc3339(SystemTime::now()),
                level = colors.color(record.level()),
                message = message,
            ))
        })
        .chain(std::io::stderr())
        .apply()
}
