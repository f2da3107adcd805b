// Copyright 2025-Present the logship authors
// SPDX-License-Identifier: Apache-2.0

/// Errors surfaced to the caller of [`crate::writer::Writer::write`].
///
/// Only input problems are reported here; delivery failures are handled by
/// the retry governor and never reach the writer's caller.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("log line is not valid JSON: {0}")]
    MalformedInput(#[from] serde_json::Error),

    #[error("log line is not a JSON object")]
    NotAnObject,
}

/// Errors from one remote send attempt.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("collector returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("invalid endpoint: {0}")]
    Endpoint(String),

    #[error("invalid credentials: {0}")]
    Credentials(String),
}

/// Errors constructing the shipping pipeline.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
