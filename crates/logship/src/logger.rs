// Copyright 2025-Present the logship authors
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use serde_json::Value;
use tracing::error;

use crate::entry::Entry;
use crate::hook::Hook;
use crate::level::Level;

/// The facade handle application code logs through.
///
/// Cloning is cheap: the hook registry and level threshold are shared, while
/// attached fields are per-handle. There is no process-global instance; the
/// logger is built once at startup and injected into call sites.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
    fields: Vec<(String, Value)>,
}

struct Inner {
    level: Level,
    report_caller: bool,
    hooks: Vec<Box<dyn Hook>>,
}

pub struct LoggerBuilder {
    level: Level,
    report_caller: bool,
    hooks: Vec<Box<dyn Hook>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        LoggerBuilder {
            level: Level::Info,
            report_caller: false,
            hooks: Vec::new(),
        }
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn report_caller(mut self, report_caller: bool) -> Self {
        self.report_caller = report_caller;
        self
    }

    pub fn hook(mut self, hook: Box<dyn Hook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn build(self) -> Logger {
        Logger {
            inner: Arc::new(Inner {
                level: self.level,
                report_caller: self.report_caller,
                hooks: self.hooks,
            }),
            fields: Vec::new(),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        LoggerBuilder::new()
    }
}

macro_rules! level_methods {
    ($plain:ident, $formatted:ident, $keyed:ident, $level:expr) => {
        #[track_caller]
        pub fn $plain(&self, message: impl AsRef<str>) {
            self.log($level, message.as_ref(), &[], Location::caller());
        }

        /// Formatted variant; call as `logger.infof(format_args!(...))`.
        #[track_caller]
        pub fn $formatted(&self, args: fmt::Arguments<'_>) {
            self.log($level, &args.to_string(), &[], Location::caller());
        }

        /// Keyed variant; extra fields apply to this entry only.
        #[track_caller]
        pub fn $keyed(&self, message: impl AsRef<str>, fields: &[(&str, Value)]) {
            self.log($level, message.as_ref(), fields, Location::caller());
        }
    };
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    level_methods!(debug, debugf, debug_kv, Level::Debug);
    level_methods!(info, infof, info_kv, Level::Info);
    level_methods!(warn, warnf, warn_kv, Level::Warn);
    level_methods!(error, errorf, error_kv, Level::Error);

    /// Logs at `Fatal` and exits the process with status 1.
    #[track_caller]
    pub fn fatal(&self, message: impl AsRef<str>) -> ! {
        self.log(Level::Fatal, message.as_ref(), &[], Location::caller());
        std::process::exit(1);
    }

    /// Logs at `Panic` and panics with the message.
    #[track_caller]
    pub fn panic(&self, message: impl AsRef<str>) -> ! {
        let message = message.as_ref();
        self.log(Level::Panic, message, &[], Location::caller());
        panic!("{message}");
    }

    /// Returns a new logger with the field appended; the receiver is
    /// unchanged.
    pub fn with(&self, key: impl Into<String>, value: impl Into<Value>) -> Logger {
        let mut fields = self.fields.clone();
        fields.push((key.into(), value.into()));
        Logger {
            inner: Arc::clone(&self.inner),
            fields,
        }
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.inner.level
    }

    fn log(
        &self,
        level: Level,
        message: &str,
        extra: &[(&str, Value)],
        location: &'static Location<'static>,
    ) {
        if !self.enabled(level) {
            return;
        }
        let mut entry = Entry::new(level, message);
        entry.fields = self.fields.clone();
        entry
            .fields
            .extend(extra.iter().map(|(k, v)| ((*k).to_string(), v.clone())));
        if self.inner.report_caller {
            entry.caller = Some(format!("{}:{}", location.file(), location.line()));
        }
        for hook in &self.inner.hooks {
            if !hook.enabled(level) {
                continue;
            }
            if let Err(e) = hook.fire(&entry) {
                error!("log hook failed: {e}");
            }
        }
    }
}
