// Copyright 2025-Present the logship authors
// SPDX-License-Identifier: Apache-2.0

//! Converts one raw facade line into a wire record.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::errors::WriteError;
use crate::proto::{LogContent, LogRecord};

/// Parses a raw line as a flat string-keyed JSON object and builds the wire
/// record: current unix seconds plus one key/value content pair per entry,
/// in the object's iteration order. Anything that is not an object is a
/// [`WriteError`]; nothing is buffered for rejected input.
pub fn parse_line(line: &[u8]) -> Result<LogRecord, WriteError> {
    let value: Value = serde_json::from_slice(line)?;
    let map = match value {
        Value::Object(map) => map,
        _ => return Err(WriteError::NotAnObject),
    };
    let contents = map
        .into_iter()
        .map(|(key, value)| LogContent {
            key,
            value: stringify(&value),
        })
        .collect();
    Ok(LogRecord {
        time: unix_now(),
        contents,
    })
}

/// String rendering of arbitrary values: strings bare, null as `null`,
/// numbers and bools as written, nested structures as compact JSON.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

// The wire format carries seconds as u32, which holds until 2106.
fn unix_now() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0) as u32
}
