// Copyright 2025-Present the logship authors
// SPDX-License-Identifier: Apache-2.0

use std::io::{self, Write as _};
use std::str::FromStr;
use std::sync::Mutex;

use bytes::Bytes;
use prost::Message;
use tracing::debug;

use crate::buffer::BatchBuffer;
use crate::delivery::{DeliveryHandle, Envelope};
use crate::errors::WriteError;
use crate::record;

pub const DEFAULT_MAX_RECORDS: usize = 5;
pub const DEFAULT_MAX_BYTES: usize = 5 * 1024 * 1024 / 2; // 2.5 MiB

/// When a batch is handed to delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Every write flushes immediately.
    Synchronous,
    /// Writes accumulate until a count or size threshold is crossed.
    Batched,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown delivery mode: {0}")]
pub struct ParseModeError(String);

impl FromStr for DeliveryMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sync" | "synchronous" => Ok(DeliveryMode::Synchronous),
            "batched" | "async" => Ok(DeliveryMode::Batched),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// The single entry point log records pass through: parses each raw line,
/// appends it to the live batch, and decides between flushing and waiting.
///
/// Safe to call from any thread. The buffer lock covers only in-memory work;
/// flushed batches go to the delivery queue and never block a write.
pub struct Writer {
    mode: DeliveryMode,
    max_records: usize,
    max_bytes: usize,
    buffer: BatchBuffer,
    delivery: DeliveryHandle,
    fallback: Mutex<Box<dyn io::Write + Send>>,
}

impl Writer {
    pub fn new(topic: &str, mode: DeliveryMode, delivery: DeliveryHandle) -> Self {
        Writer {
            mode,
            max_records: DEFAULT_MAX_RECORDS,
            max_bytes: DEFAULT_MAX_BYTES,
            buffer: BatchBuffer::new(topic),
            delivery,
            fallback: Mutex::new(Box::new(io::stdout())),
        }
    }

    pub fn with_thresholds(mut self, max_records: usize, max_bytes: usize) -> Self {
        self.max_records = max_records.max(1);
        self.max_bytes = max_bytes.max(1);
        self
    }

    /// Replaces the fallback mirror sink (stdout by default).
    pub fn with_fallback(mut self, sink: Box<dyn io::Write + Send>) -> Self {
        self.fallback = Mutex::new(sink);
        self
    }

    /// Accepts one raw line. Malformed input is an error and buffers
    /// nothing. Accepted lines are appended and either trigger a flush
    /// (always in synchronous mode; on a crossed threshold in batched mode)
    /// or are mirrored to the fallback sink.
    pub fn write(&self, line: &[u8]) -> Result<(), WriteError> {
        let record = record::parse_line(line)?;
        let (count, bytes) = self.buffer.append(record);
        let flush = match self.mode {
            DeliveryMode::Synchronous => true,
            DeliveryMode::Batched => count >= self.max_records || bytes > self.max_bytes,
        };
        if flush {
            self.flush();
        } else {
            self.mirror(line);
        }
        Ok(())
    }

    /// Records currently buffered and not yet flushed.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Hands the accumulated batch to delivery. An empty batch never
    /// produces a network call.
    pub fn flush(&self) {
        let group = self.buffer.snapshot_and_clear();
        if group.records.is_empty() {
            return;
        }
        let records = group.records.len();
        let body = Bytes::from(group.encode_to_vec());
        debug!("flushing batch of {records} records ({} bytes)", body.len());
        let _ = self.delivery.enqueue(Envelope { body, records });
    }

    fn mirror(&self, line: &[u8]) {
        #[allow(clippy::expect_used)]
        let mut fallback = self.fallback.lock().expect("lock poisoned");
        // Best effort; a broken mirror must not affect the caller.
        let _ = fallback
            .write_all(line)
            .and_then(|()| fallback.write_all(b"\n"));
    }
}
