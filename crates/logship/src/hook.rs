// Copyright 2025-Present the logship authors
// SPDX-License-Identifier: Apache-2.0

use std::io::{self, Write};

use crate::config::Format;
use crate::entry::Entry;
use crate::level::Level;

/// A pluggable log sink, invoked once per emitted entry.
///
/// Hooks must be cheap to call and must never panic; a failing hook is
/// reported through the library's own diagnostics and otherwise ignored.
pub trait Hook: Send + Sync {
    fn fire(&self, entry: &Entry) -> Result<(), HookError>;

    /// Level filter; the default admits every level.
    fn enabled(&self, _level: Level) -> bool {
        true
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("syslog error: {0}")]
    Syslog(String),

    #[error("sink error: {0}")]
    Sink(String),
}

pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes entries to the standard streams: stdout below `Error`, stderr at
/// `Error` and above.
pub struct ConsoleHook {
    format: Format,
}

impl ConsoleHook {
    pub fn new(format: Format) -> Self {
        ConsoleHook { format }
    }

    fn render(&self, entry: &Entry) -> String {
        match self.format {
            Format::Json => entry.to_json_line(),
            Format::Text => {
                let mut line = format!(
                    "{}\t{}\t{}",
                    entry.timestamp.format(TIMESTAMP_FORMAT),
                    entry.level,
                    entry.format_message()
                );
                if let Some(caller) = &entry.caller {
                    line.push_str(&format!("\t{caller}"));
                }
                line
            }
        }
    }
}

impl Hook for ConsoleHook {
    fn fire(&self, entry: &Entry) -> Result<(), HookError> {
        let line = self.render(entry);
        if entry.level >= Level::Error {
            writeln!(io::stderr().lock(), "{line}")?;
        } else {
            writeln!(io::stdout().lock(), "{line}")?;
        }
        Ok(())
    }
}
