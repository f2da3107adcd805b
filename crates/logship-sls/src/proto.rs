// Copyright 2025-Present the logship authors
// SPDX-License-Identifier: Apache-2.0

//! Wire format sent to the collector: a `LogGroup` envelope of topic plus
//! timestamped key/value records, protobuf-encoded. The field tags match the
//! collector's published schema; messages are derived by hand rather than
//! generated so the build needs no protoc step.

use prost::Message;

#[derive(Clone, PartialEq, Message)]
pub struct LogContent {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(string, tag = "2")]
    pub value: String,
}

#[derive(Clone, PartialEq, Message)]
pub struct LogRecord {
    /// Unix seconds, captured at append time.
    #[prost(uint32, tag = "1")]
    pub time: u32,
    #[prost(message, repeated, tag = "2")]
    pub contents: Vec<LogContent>,
}

#[derive(Clone, PartialEq, Message)]
pub struct LogGroup {
    #[prost(message, repeated, tag = "1")]
    pub records: Vec<LogRecord>,
    #[prost(string, optional, tag = "3")]
    pub topic: Option<String>,
    #[prost(string, optional, tag = "4")]
    pub source: Option<String>,
}

/// Encoded size of the group a `(topic, records)` pair would serialize to,
/// without materializing the group. Used for the batch size threshold on
/// every append.
pub fn group_encoded_len(topic: &str, records: &[LogRecord]) -> usize {
    let records_len: usize = records
        .iter()
        .map(|record| {
            let len = record.encoded_len();
            1 + prost::length_delimiter_len(len) + len
        })
        .sum();
    let topic_len = 1 + prost::length_delimiter_len(topic.len()) + topic.len();
    records_len + topic_len
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records(n: usize) -> Vec<LogRecord> {
        (0..n)
            .map(|i| LogRecord {
                time: 1_700_000_000 + i as u32,
                contents: vec![
                    LogContent {
                        key: "msg".to_string(),
                        value: format!("line {i}"),
                    },
                    LogContent {
                        key: "level".to_string(),
                        value: "info".to_string(),
                    },
                ],
            })
            .collect()
    }

    #[test]
    fn test_group_encoded_len_matches_encoding() {
        for n in [0, 1, 5, 100] {
            let records = sample_records(n);
            let group = LogGroup {
                records: records.clone(),
                topic: Some("orders".to_string()),
                source: None,
            };
            assert_eq!(
                group_encoded_len("orders", &records),
                group.encode_to_vec().len(),
                "mismatch at {n} records"
            );
        }
    }

    #[test]
    fn test_envelope_decodes() {
        let group = LogGroup {
            records: sample_records(2),
            topic: Some("orders".to_string()),
            source: None,
        };
        let decoded = LogGroup::decode(group.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded, group);
    }
}
