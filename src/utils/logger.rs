//! Logging utilities
//!
//! Provides logging configuration and helpers.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log level configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Pick the level to run at: `--verbose`, then an explicit `--log-level`,
/// then the environment's value. An environment value that does not name a
/// level is handed back so it can be reported once logging is up.
pub fn resolve_level(
    verbose: bool,
    explicit: Option<LogLevel>,
    from_env: Option<&str>,
) -> (LogLevel, Option<String>) {
    if verbose {
        return (LogLevel::Debug, None);
    }
    if let Some(level) = explicit {
        return (level, None);
    }
    match from_env {
        Some(raw) => match LogLevel::from_str(raw) {
            Some(level) => (level, None),
            None => (LogLevel::Info, Some(raw.to_string())),
        },
        None => (LogLevel::Info, None),
    }
}

/// Filter directive for our own crate at `level`
fn directive(level: LogLevel) -> String {
    format!("payment_probe={}", level.to_tracing_level())
}

/// Initialize the logger with specified level. `RUST_LOG` wins when set.
pub fn init_logger(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive(level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_str() {
        assert_eq!(LogLevel::from_str("info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::from_str("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_str("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_str("unknown"), None);
    }

    #[test]
    fn test_resolve_level_precedence() {
        assert_eq!(
            resolve_level(true, Some(LogLevel::Error), Some("trace")),
            (LogLevel::Debug, None)
        );
        assert_eq!(
            resolve_level(false, Some(LogLevel::Error), Some("trace")),
            (LogLevel::Error, None)
        );
        assert_eq!(resolve_level(false, None, Some("trace")), (LogLevel::Trace, None));
        assert_eq!(resolve_level(false, None, None), (LogLevel::Info, None));
    }

    #[test]
    fn test_resolve_level_reports_unknown_env_value() {
        assert_eq!(
            resolve_level(false, None, Some("chatty")),
            (LogLevel::Info, Some("chatty".to_string()))
        );
        // An explicit level makes the environment irrelevant
        assert_eq!(
            resolve_level(false, Some(LogLevel::Warn), Some("chatty")),
            (LogLevel::Warn, None)
        );
    }

    #[test]
    fn test_directive() {
        assert_eq!(directive(LogLevel::Debug), "payment_probe=DEBUG");
    }
}
