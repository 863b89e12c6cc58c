use tracing::Level;
use tracing::subscriber::SetGlobalDefaultError;

use crate::config::LoggingConfig;

/// Unknown level names fall back to `warn`.
pub fn parse_level(name: &str) -> Level {
    name.trim().parse().unwrap_or(Level::WARN)
}

/// Installs the global subscriber. Logs go to stderr; stdout carries the
/// report.
pub fn init_logging(config: &LoggingConfig) -> Result<(), SetGlobalDefaultError> {
    let level = parse_level(&config.level);
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.format.eq_ignore_ascii_case("json") {
        let subscriber = builder.with_ansi(false).json().finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    }
}
