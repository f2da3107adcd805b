// Copyright 2025-Present the logship authors
// SPDX-License-Identifier: Apache-2.0

use std::sync::Mutex;

use crate::proto::{self, LogGroup, LogRecord};

/// Append-only accumulation of wire records sharing one topic.
///
/// `append` and `snapshot_and_clear` are the only mutators, both serialized
/// by a single lock held only for in-memory work, never across a network
/// call. Between any two snapshots, every appended record lands in exactly
/// one snapshot.
pub struct BatchBuffer {
    topic: String,
    records: Mutex<Vec<LogRecord>>,
}

impl BatchBuffer {
    pub fn new(topic: impl Into<String>) -> Self {
        BatchBuffer {
            topic: topic.into(),
            records: Mutex::new(Vec::new()),
        }
    }

    /// Appends under the lock; returns the post-append record count and the
    /// encoded size of the live group.
    pub fn append(&self, record: LogRecord) -> (usize, usize) {
        #[allow(clippy::expect_used)]
        let mut records = self.records.lock().expect("lock poisoned");
        records.push(record);
        let count = records.len();
        let size = proto::group_encoded_len(&self.topic, &records);
        (count, size)
    }

    /// Hands off the accumulated batch and leaves the live buffer empty;
    /// the topic is preserved. Atomic with respect to concurrent appends.
    pub fn snapshot_and_clear(&self) -> LogGroup {
        let records = {
            #[allow(clippy::expect_used)]
            let mut records = self.records.lock().expect("lock poisoned");
            std::mem::take(&mut *records)
        };
        LogGroup {
            records,
            topic: Some(self.topic.clone()),
            source: None,
        }
    }

    pub fn len(&self) -> usize {
        #[allow(clippy::expect_used)]
        let records = self.records.lock().expect("lock poisoned");
        records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
