// Copyright 2025-Present the logship authors
// SPDX-License-Identifier: Apache-2.0

//! A structured-logging facade with pluggable output hooks.
//!
//! Application code talks to a [`Logger`], which builds one [`Entry`] per
//! emitted line and fans it out to every registered [`Hook`]. Hooks are thin
//! sink adapters (console, file, syslog); the remote collector hook lives in
//! the `logship-sls` crate.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod bridge;
pub mod config;
pub mod entry;
pub mod file;
pub mod hook;
pub mod level;
pub mod logger;
pub mod syslog_hook;

pub use bridge::LogBridge;
pub use config::{Format, LogConfig, SinkConfig};
pub use entry::Entry;
pub use hook::{ConsoleHook, Hook, HookError};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder};
pub use syslog_hook::{SyslogHook, SyslogTransport};
