#![forbid(unsafe_code)]

//! Tracing subscriber setup.
//!
//! The interactive UI owns the terminal, so it logs to a file. The one-shot
//! subcommands log to stderr.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

/// `RUST_LOG` when set, otherwise the configured directive.
///
/// # Errors
///
/// [`AppError::Logging`] if the chosen directive does not parse.
pub fn build_filter(env: Option<&str>, fallback: &str) -> Result<EnvFilter> {
    let directive = env.filter(|value| !value.trim().is_empty()).unwrap_or(fallback);
    EnvFilter::try_new(directive).map_err(|error| AppError::Logging {
        message: format!("bad filter {directive:?}: {error}"),
    })
}

/// Install the global subscriber.
///
/// # Errors
///
/// [`AppError::Logging`] for a bad filter or a subscriber already set,
/// I/O errors opening the log file.
pub fn init(config: &LogConfig, target: LogTarget) -> Result<()> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(env.as_deref(), &config.filter)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|error| AppError::Logging {
        message: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn env_directive_wins() {
        let filter = build_filter(Some("rack=trace"), "info").unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn blank_env_falls_back_to_config() {
        let filter = build_filter(Some("  "), "warn").unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
        let filter = build_filter(None, "rack.engine=debug").unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn malformed_directive_is_reported() {
        let err = build_filter(None, "rack=loud").unwrap_err();
        assert!(matches!(err, AppError::Logging { .. }));
    }
}
