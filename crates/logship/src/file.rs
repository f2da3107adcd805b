// Copyright 2025-Present the logship authors
// SPDX-License-Identifier: Apache-2.0

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use crate::config::Format;
use crate::entry::Entry;
use crate::hook::{Hook, HookError, TIMESTAMP_FORMAT};

/// Appends one rendered line per entry to a log file.
pub struct FileHook {
    file: Mutex<File>,
    format: Format,
}

impl FileHook {
    pub fn new(path: impl AsRef<Path>, format: Format) -> Result<Self, HookError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(FileHook {
            file: Mutex::new(file),
            format,
        })
    }

    fn render(&self, entry: &Entry) -> String {
        match self.format {
            Format::Json => entry.to_json_line(),
            Format::Text => format!(
                "{}\t{}\t{}",
                entry.timestamp.format(TIMESTAMP_FORMAT),
                entry.level,
                entry.format_message()
            ),
        }
    }
}

impl Hook for FileHook {
    fn fire(&self, entry: &Entry) -> Result<(), HookError> {
        let line = self.render(entry);
        #[allow(clippy::expect_used)]
        let mut file = self.file.lock().expect("lock poisoned");
        writeln!(file, "{line}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use serde_json::Value;

    #[test]
    fn test_appends_one_line_per_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let hook = FileHook::new(&path, Format::Text).unwrap();

        let mut first = Entry::new(Level::Info, "started");
        first.fields.push(("port".to_string(), Value::from(8080)));
        hook.fire(&first).unwrap();
        hook.fire(&Entry::new(Level::Error, "boom")).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("started [port] 8080"));
        assert!(lines[1].contains("\terror\tboom"));
    }

    #[test]
    fn test_reopening_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");

        FileHook::new(&path, Format::Json)
            .unwrap()
            .fire(&Entry::new(Level::Info, "one"))
            .unwrap();
        FileHook::new(&path, Format::Json)
            .unwrap()
            .fire(&Entry::new(Level::Info, "two"))
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }
}
