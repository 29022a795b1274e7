//! File logging. The terminal belongs to the UI, so nothing is written to
//! stdout or stderr while it runs.

use crate::config::LoggingConfig;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "jee-tracker.log";

/// Keeps the background writer alive. Dropping it flushes pending lines.
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

/// `RUST_LOG` wins over the configured level; a bad directive falls back to `info`.
pub fn build_filter(level: &str) -> EnvFilter {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    resolve_filter(env.as_deref(), level)
}

fn resolve_filter(env: Option<&str>, level: &str) -> EnvFilter {
    env.filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Install the global subscriber writing to a daily rolling file in `log_dir`.
/// Returns `None` (and installs nothing) when logging is disabled or the
/// directory cannot be created.
pub fn init_tracing(config: &LoggingConfig, log_dir: Option<&Path>) -> Option<FileLogGuard> {
    if !config.enabled {
        return None;
    }
    let log_dir = log_dir?;
    std::fs::create_dir_all(log_dir).ok()?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(build_filter(&config.level))
        .with(file_layer)
        .try_init()
        .ok()?;

    Some(FileLogGuard { _guard: guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_logging_installs_nothing() {
        let config = LoggingConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(init_tracing(&config, Some(Path::new("/nonexistent"))).is_none());
    }

    #[test]
    fn test_missing_dir_installs_nothing() {
        assert!(init_tracing(&LoggingConfig::default(), None).is_none());
    }

    // The only test that installs the global subscriber.
    #[test]
    fn test_creates_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        let guard = init_tracing(&LoggingConfig::default(), Some(&logs));
        assert!(guard.is_some());
        assert!(logs.is_dir());
    }

    #[test]
    fn test_bad_level_falls_back() {
        assert_eq!(resolve_filter(None, "=[not a filter").to_string(), "info");
    }

    #[test]
    fn test_env_directives_win() {
        assert_eq!(resolve_filter(Some("warn"), "debug").to_string(), "warn");
        assert_eq!(resolve_filter(None, "debug").to_string(), "debug");
        // Blank or broken env falls through to the configured level.
        assert_eq!(resolve_filter(Some("  "), "trace").to_string(), "trace");
        assert_eq!(resolve_filter(Some("=[bad"), "error").to_string(), "error");
    }
}
