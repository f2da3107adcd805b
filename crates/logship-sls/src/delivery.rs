// Copyright 2025-Present the logship authors
// SPDX-License-Identifier: Apache-2.0

use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::retry::RetryStrategy;
use crate::transport::Transport;

/// One encoded batch awaiting delivery.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub body: Bytes,
    pub records: usize,
}

/// Sender side of the delivery queue. Cheap to clone; the queue is bounded
/// and the handoff never blocks, so a slow collector cannot stall the append
/// path.
#[derive(Clone)]
pub struct DeliveryHandle {
    tx: mpsc::Sender<Envelope>,
}

impl DeliveryHandle {
    /// Hands an envelope to the delivery task. A full queue or stopped
    /// service drops the envelope with a warning; returns whether the
    /// envelope was accepted.
    pub fn enqueue(&self, envelope: Envelope) -> bool {
        match self.tx.try_send(envelope) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(envelope)) => {
                warn!(
                    "delivery queue full, dropping batch of {} records",
                    envelope.records
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(envelope)) => {
                warn!(
                    "delivery service stopped, dropping batch of {} records",
                    envelope.records
                );
                false
            }
        }
    }
}

/// Drains the delivery queue, pushing each envelope through the retry
/// governor. Runs until every handle is dropped; retries for one envelope
/// complete before the next is taken.
pub struct DeliveryService<T: Transport> {
    transport: T,
    retry: RetryStrategy,
    resource: String,
    rx: mpsc::Receiver<Envelope>,
}

impl<T: Transport> DeliveryService<T> {
    pub fn new(
        transport: T,
        retry: RetryStrategy,
        log_store: &str,
        capacity: usize,
    ) -> (Self, DeliveryHandle) {
        let (tx, rx) = mpsc::channel(capacity);
        let service = DeliveryService {
            transport,
            retry,
            resource: format!("logstores/{log_store}"),
            rx,
        };
        (service, DeliveryHandle { tx })
    }

    pub async fn run(mut self) {
        debug!("delivery service started for {}", self.resource);
        while let Some(envelope) = self.rx.recv().await {
            self.retry
                .deliver(&self.transport, envelope.body, &self.resource)
                .await;
        }
        debug!("delivery service stopped for {}", self.resource);
    }
}
