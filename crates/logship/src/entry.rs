// Copyright 2025-Present the logship authors
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::level::Level;

/// One structured log line at the moment of hand-off to the hooks.
///
/// Fields are an ordered sequence; duplicate keys are allowed and preserved
/// in order.
#[derive(Debug, Clone)]
pub struct Entry {
    pub level: Level,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub fields: Vec<(String, Value)>,
    /// `file:line` of the emitting call site, when caller reporting is on.
    pub caller: Option<String>,
}

impl Entry {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Entry {
            level,
            timestamp: Utc::now(),
            message: message.into(),
            fields: Vec::new(),
            caller: None,
        }
    }

    /// Renders the entry as a single-line JSON object: `level`, `ts` (unix
    /// seconds), `msg`, then every field in order, then `caller` when
    /// present. This is the representation the remote shipping hook parses.
    pub fn to_json_line(&self) -> String {
        let mut map = serde_json::Map::new();
        map.insert("level".to_string(), Value::from(self.level.as_str()));
        map.insert("ts".to_string(), Value::from(self.timestamp.timestamp()));
        map.insert("msg".to_string(), Value::from(self.message.clone()));
        for (key, value) in &self.fields {
            map.insert(key.clone(), value.clone());
        }
        if let Some(caller) = &self.caller {
            map.insert("caller".to_string(), Value::from(caller.clone()));
        }
        Value::Object(map).to_string()
    }

    /// Renders the message with its fields inline: `"<msg> [<key>] <value>"`.
    ///
    /// Keys prefixed `err_` are skipped; the value of `err_full`, when
    /// present, is appended verbatim at the end.
    pub fn format_message(&self) -> String {
        let mut message = self.message.clone();
        for (key, value) in &self.fields {
            if key.starts_with("err_") {
                continue;
            }
            message.push_str(&format!(" [{key}] {}", render(value)));
        }
        if let Some((_, full)) = self.fields.iter().find(|(key, _)| key == "err_full") {
            message.push_str(&render(full));
        }
        message
    }
}

/// String rendering for arbitrary field values: strings bare, null as
/// `null`, everything else as compact JSON.
pub(crate) fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_line_shape() {
        let mut entry = Entry::new(Level::Info, "started");
        entry.fields.push(("port".to_string(), Value::from(8125)));
        entry.caller = Some("src/main.rs:42".to_string());

        let line = entry.to_json_line();
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["msg"], "started");
        assert_eq!(parsed["port"], 8125);
        assert_eq!(parsed["caller"], "src/main.rs:42");
        assert!(parsed["ts"].is_i64());
    }

    #[test]
    fn test_json_line_preserves_field_order() {
        let mut entry = Entry::new(Level::Debug, "m");
        entry.fields.push(("zebra".to_string(), Value::from(1)));
        entry.fields.push(("alpha".to_string(), Value::from(2)));

        let line = entry.to_json_line();
        let zebra = line.find("zebra").unwrap();
        let alpha = line.find("alpha").unwrap();
        assert!(zebra < alpha, "insertion order must survive serialization");
    }

    #[test]
    fn test_format_message_skips_err_fields() {
        let mut entry = Entry::new(Level::Error, "request failed");
        entry.fields.push(("status".to_string(), Value::from(502)));
        entry
            .fields
            .push(("err_code".to_string(), Value::from("EPIPE")));
        entry
            .fields
            .push(("err_full".to_string(), Value::from(" broken pipe")));

        assert_eq!(
            entry.format_message(),
            "request failed [status] 502 broken pipe"
        );
    }

    #[test]
    fn test_render_values() {
        assert_eq!(render(&Value::from("plain")), "plain");
        assert_eq!(render(&Value::from(2.5)), "2.5");
        assert_eq!(render(&Value::from(true)), "true");
        assert_eq!(render(&Value::Null), "null");
        assert_eq!(render(&serde_json::json!({"a": 1})), r#"{"a":1}"#);
    }
}
