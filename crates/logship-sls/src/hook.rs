// Copyright 2025-Present the logship authors
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use logship::{Entry, Hook, HookError};

use crate::writer::Writer;

/// Facade hook that forwards every entry, rendered as its JSON line, to the
/// remote collector writer. Admits all levels.
pub struct SlsHook {
    writer: Arc<Writer>,
}

impl SlsHook {
    pub fn new(writer: Arc<Writer>) -> Self {
        SlsHook { writer }
    }
}

impl Hook for SlsHook {
    fn fire(&self, entry: &Entry) -> Result<(), HookError> {
        let line = entry.to_json_line();
        self.writer
            .write(line.as_bytes())
            .map_err(|e| HookError::Sink(e.to_string()))
    }
}
