// Copyright 2025-Present the logship authors
// SPDX-License-Identifier: Apache-2.0

//! Remote log-shipping hook for the `logship` facade.
//!
//! Structured entries are parsed into wire records, accumulated in a
//! mutex-guarded batch, and flushed to a remote collector when a count or
//! size threshold is crossed (or on every write in synchronous mode).
//! Delivery happens off the append path, through a bounded queue, with
//! bounded retry and linear backoff; failures are logged and dropped, never
//! surfaced to the logging call site.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod buffer;
pub mod config;
pub mod delivery;
pub mod errors;
pub mod hook;
pub mod proto;
pub mod record;
pub mod retry;
pub mod transport;
pub mod writer;

pub use config::SlsConfig;
pub use delivery::{DeliveryHandle, DeliveryService, Envelope};
pub use errors::{BuildError, TransportError, WriteError};
pub use hook::SlsHook;
pub use retry::RetryStrategy;
pub use transport::{HttpTransport, Transport};
pub use writer::{DeliveryMode, Writer};
