// Copyright 2025-Present the logship authors
// SPDX-License-Identifier: Apache-2.0

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

use crate::file::FileHook;
use crate::hook::ConsoleHook;
use crate::level::Level;
use crate::logger::{Logger, LoggerBuilder};
use crate::syslog_hook::{SyslogHook, SyslogTransport};

/// Output rendering for the console and file sinks; chosen once at
/// configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Text,
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "text" | "console" => Ok(Format::Text),
            other => Err(ConfigError::InvalidFormat(other.to_string())),
        }
    }
}

/// One configured sink. The remote collector sink is attached separately by
/// the shipper crate.
#[derive(Debug, Clone)]
pub enum SinkConfig {
    Console,
    File { path: PathBuf },
    Syslog { transport: SyslogTransport, tag: String },
}

/// Facade configuration, resolvable from the environment.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub format: Format,
    pub report_caller: bool,
    pub sinks: Vec<SinkConfig>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: Level::Info,
            format: Format::Text,
            report_caller: false,
            sinks: vec![SinkConfig::Console],
        }
    }
}

impl LogConfig {
    /// Reads `LOG_LEVEL`, `LOG_FORMAT`, `LOG_REPORT_CALLER`, `LOG_FILE` and
    /// `LOG_SYSLOG`/`LOG_SYSLOG_TAG`. Unset variables fall back to the
    /// defaults; set-but-invalid values are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = LogConfig::default();

        if let Ok(level) = env::var("LOG_LEVEL") {
            config.level = level
                .parse()
                .map_err(|_| ConfigError::InvalidLevel(level))?;
        }
        if let Ok(format) = env::var("LOG_FORMAT") {
            config.format = format.parse()?;
        }
        config.report_caller = env::var("LOG_REPORT_CALLER")
            .map(|val| val.to_lowercase() == "true" || val == "1")
            .unwrap_or(false);

        if let Ok(path) = env::var("LOG_FILE") {
            config.sinks.push(SinkConfig::File { path: path.into() });
        }
        if let Ok(addr) = env::var("LOG_SYSLOG") {
            let transport = addr
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("bad LOG_SYSLOG value: {addr}")))?;
            let tag = env::var("LOG_SYSLOG_TAG").unwrap_or_else(|_| "logship".to_string());
            config.sinks.push(SinkConfig::Syslog { transport, tag });
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for sink in &self.sinks {
            match sink {
                SinkConfig::File { path } if path.as_os_str().is_empty() => {
                    return Err(ConfigError::Invalid("file sink path is empty".to_string()));
                }
                SinkConfig::Syslog { tag, .. } if tag.is_empty() => {
                    return Err(ConfigError::Invalid("syslog tag is empty".to_string()));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Builds a [`LoggerBuilder`] with every configured sink attached. A
    /// sink that fails to construct is skipped with a warning; it never
    /// aborts logger construction.
    pub fn build(&self) -> LoggerBuilder {
        let mut builder = Logger::builder()
            .level(self.level)
            .report_caller(self.report_caller);
        for sink in &self.sinks {
            match sink {
                SinkConfig::Console => {
                    builder = builder.hook(Box::new(ConsoleHook::new(self.format)));
                }
                SinkConfig::File { path } => match FileHook::new(path, self.format) {
                    Ok(hook) => builder = builder.hook(Box::new(hook)),
                    Err(e) => warn!("file sink disabled: {e}"),
                },
                SinkConfig::Syslog { transport, tag } => {
                    match SyslogHook::connect(transport, tag.clone()) {
                        Ok(hook) => builder = builder.hook(Box::new(hook)),
                        Err(e) => warn!("syslog sink disabled: {e}"),
                    }
                }
            }
        }
        builder
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid log level: {0}")]
    InvalidLevel(String),

    #[error("invalid log format: {0}")]
    InvalidFormat(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "LOG_LEVEL",
            "LOG_FORMAT",
            "LOG_REPORT_CALLER",
            "LOG_FILE",
            "LOG_SYSLOG",
            "LOG_SYSLOG_TAG",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = LogConfig::from_env().unwrap();
        assert_eq!(config.level, Level::Info);
        assert_eq!(config.format, Format::Text);
        assert!(!config.report_caller);
        assert_eq!(config.sinks.len(), 1);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        env::set_var("LOG_LEVEL", "debug");
        env::set_var("LOG_FORMAT", "json");
        env::set_var("LOG_REPORT_CALLER", "true");
        env::set_var("LOG_FILE", "/tmp/app.log");

        let config = LogConfig::from_env().unwrap();
        assert_eq!(config.level, Level::Debug);
        assert_eq!(config.format, Format::Json);
        assert!(config.report_caller);
        assert_eq!(config.sinks.len(), 2);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_level_is_an_error() {
        clear_env();
        env::set_var("LOG_LEVEL", "verbose");
        assert!(LogConfig::from_env().is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_format_is_an_error() {
        clear_env();
        env::set_var("LOG_FORMAT", "yaml");
        assert!(LogConfig::from_env().is_err());
        clear_env();
    }

    #[test]
    fn test_build_skips_broken_file_sink() {
        let config = LogConfig {
            sinks: vec![SinkConfig::File {
                path: "/nonexistent-dir/deeply/nested/app.log".into(),
            }],
            ..Default::default()
        };
        // Must not error or panic; the sink is skipped.
        let logger = config.build().build();
        logger.info("still works");
    }
}
