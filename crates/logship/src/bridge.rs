// Copyright 2025-Present the logship authors
// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;

use crate::level::Level;
use crate::logger::Logger;

/// Adapter that routes `log` crate records through the facade, so
/// dependencies logging via `log::info!` and friends share the configured
/// sinks. The record target travels as a `target` field; `Trace` collapses
/// into `Debug`, which has no finer sibling here.
pub struct LogBridge {
    logger: Logger,
}

impl LogBridge {
    pub fn new(logger: Logger) -> Self {
        LogBridge { logger }
    }

    /// Registers the bridge as the process-wide `log` logger. Fails if a
    /// global logger is already set.
    pub fn install(logger: Logger) -> Result<(), log::SetLoggerError> {
        let filter = max_level(&logger);
        log::set_boxed_logger(Box::new(LogBridge::new(logger)))?;
        log::set_max_level(filter);
        Ok(())
    }
}

fn map_level(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug | log::Level::Trace => Level::Debug,
    }
}

fn max_level(logger: &Logger) -> log::LevelFilter {
    if logger.enabled(Level::Debug) {
        log::LevelFilter::Trace
    } else if logger.enabled(Level::Info) {
        log::LevelFilter::Info
    } else if logger.enabled(Level::Warn) {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Error
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.logger.enabled(map_level(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        let level = map_level(record.level());
        let target = record.target();
        if target.is_empty() {
            self.dispatch(level, &message, &[]);
        } else {
            self.dispatch(level, &message, &[("target", Value::from(target))]);
        }
    }

    fn flush(&self) {}
}

impl LogBridge {
    fn dispatch(&self, level: Level, message: &str, fields: &[(&str, Value)]) {
        match level {
            Level::Error => self.logger.error_kv(message, fields),
            Level::Warn => self.logger.warn_kv(message, fields),
            Level::Info => self.logger.info_kv(message, fields),
            _ => self.logger.debug_kv(message, fields),
        }
    }
}
