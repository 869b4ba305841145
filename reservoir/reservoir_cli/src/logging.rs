//! Log output for the command line.
//!
//! The library crates log through the `log` facade; the subscriber installed
//! here picks those records up through its `tracing-log` bridge and writes
//! them to stderr, keeping stdout for command output.

use reservoir_core::LogLevel;
use tracing::Level;

fn tracing_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warning => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}

/// Install the global subscriber. Only the first call has any effect.
pub fn init(level: LogLevel) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_level(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(tracing_level(LogLevel::Trace), Level::TRACE);
        assert_eq!(tracing_level(LogLevel::Warning), Level::WARN);
        assert_eq!(tracing_level(LogLevel::Error), Level::ERROR);
    }
}
