// Copyright 2025-Present the logship authors
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::Method;
use tracing::{debug, warn};

use crate::transport::Transport;

/// Bounded retry with linear backoff around a flush attempt.
#[derive(Debug, Clone)]
pub struct RetryStrategy {
    max_attempts: u32,
    backoff_unit: Duration,
}

impl Default for RetryStrategy {
    fn default() -> Self {
        RetryStrategy {
            max_attempts: 3,
            backoff_unit: Duration::from_secs(2),
        }
    }
}

impl RetryStrategy {
    pub fn new(max_attempts: u32, backoff_unit: Duration) -> Self {
        RetryStrategy {
            max_attempts: max_attempts.max(1),
            backoff_unit,
        }
    }

    /// Sends `body` until it succeeds or the attempt cap is reached, then
    /// drops it. Never returns an error: batched delivery is best-effort and
    /// exhaustion is logged, not propagated.
    ///
    /// The backoff delay scales with the attempt index before it is
    /// incremented, so the first retry fires immediately and the second
    /// waits one backoff unit. That sequence is deliberate and pinned by
    /// tests.
    pub async fn deliver<T: Transport + ?Sized>(&self, transport: &T, body: Bytes, resource: &str) {
        let mut attempt: u32 = 0;
        loop {
            match transport
                .send(Method::POST, HeaderMap::new(), body.clone(), resource)
                .await
            {
                Ok(status) => {
                    debug!("delivered batch to {resource} ({status})");
                    return;
                }
                Err(err) => {
                    if attempt + 1 >= self.max_attempts {
                        warn!(
                            "dropping batch after {} attempts: {err}",
                            attempt + 1
                        );
                        return;
                    }
                    tokio::time::sleep(self.backoff_unit * attempt).await;
                    attempt += 1;
                }
            }
        }
    }
}
