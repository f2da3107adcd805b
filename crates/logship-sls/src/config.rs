// Copyright 2025-Present the logship authors
// SPDX-License-Identifier: Apache-2.0

use std::env;
use std::sync::Arc;
use std::time::Duration;

use logship::LoggerBuilder;
use tracing::warn;

use crate::delivery::DeliveryService;
use crate::errors::BuildError;
use crate::hook::SlsHook;
use crate::retry::RetryStrategy;
use crate::transport::HttpTransport;
use crate::writer::{DeliveryMode, Writer, DEFAULT_MAX_BYTES, DEFAULT_MAX_RECORDS};

const DEFAULT_QUEUE_CAPACITY: usize = 64;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote collector configuration, resolvable from the environment.
#[derive(Debug, Clone)]
pub struct SlsConfig {
    pub endpoint: String,
    pub access_key: String,
    pub access_secret: String,
    pub log_store: String,
    pub topic: String,
    pub mode: DeliveryMode,
    pub max_records: usize,
    pub max_bytes: usize,
    pub queue_capacity: usize,
    pub request_timeout: Duration,
}

impl Default for SlsConfig {
    fn default() -> Self {
        SlsConfig {
            endpoint: String::new(),
            access_key: String::new(),
            access_secret: String::new(),
            log_store: String::new(),
            topic: String::new(),
            mode: DeliveryMode::Batched,
            max_records: DEFAULT_MAX_RECORDS,
            max_bytes: DEFAULT_MAX_BYTES,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl SlsConfig {
    /// Reads `SLS_ENDPOINT`, `SLS_ACCESS_KEY`, `SLS_ACCESS_SECRET`,
    /// `SLS_LOG_STORE`, `SLS_TOPIC`, `SLS_MODE`, `SLS_MAX_RECORDS` and
    /// `SLS_MAX_BYTES`.
    pub fn from_env() -> Result<Self, BuildError> {
        let mut config = SlsConfig {
            endpoint: env::var("SLS_ENDPOINT").unwrap_or_default(),
            access_key: env::var("SLS_ACCESS_KEY").unwrap_or_default(),
            access_secret: env::var("SLS_ACCESS_SECRET").unwrap_or_default(),
            log_store: env::var("SLS_LOG_STORE").unwrap_or_default(),
            topic: env::var("SLS_TOPIC").unwrap_or_default(),
            ..Default::default()
        };
        if let Ok(mode) = env::var("SLS_MODE") {
            config.mode = mode
                .parse()
                .map_err(|_| BuildError::InvalidConfig(format!("bad SLS_MODE value: {mode}")))?;
        }
        if let Ok(value) = env::var("SLS_MAX_RECORDS") {
            config.max_records = value.parse().map_err(|_| {
                BuildError::InvalidConfig(format!("bad SLS_MAX_RECORDS value: {value}"))
            })?;
        }
        if let Ok(value) = env::var("SLS_MAX_BYTES") {
            config.max_bytes = value.parse().map_err(|_| {
                BuildError::InvalidConfig(format!("bad SLS_MAX_BYTES value: {value}"))
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BuildError> {
        if self.endpoint.trim().is_empty() {
            return Err(BuildError::InvalidConfig("endpoint is empty".to_string()));
        }
        if self.access_key.trim().is_empty() {
            return Err(BuildError::InvalidConfig("access key is empty".to_string()));
        }
        if self.log_store.trim().is_empty() {
            return Err(BuildError::InvalidConfig("log store is empty".to_string()));
        }
        if self.max_records == 0 {
            return Err(BuildError::InvalidConfig(
                "max_records must be at least 1".to_string(),
            ));
        }
        if self.max_bytes == 0 {
            return Err(BuildError::InvalidConfig(
                "max_bytes must be at least 1".to_string(),
            ));
        }
        if self.queue_capacity == 0 {
            return Err(BuildError::InvalidConfig(
                "queue_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the shipping pipeline and attaches its hook to the builder.
    ///
    /// A hook that cannot be constructed is logged and skipped; the rest of
    /// the logger is unaffected. Must be called from within a tokio runtime
    /// (the delivery task is spawned here).
    pub fn register(&self, builder: LoggerBuilder) -> LoggerBuilder {
        match self.build_hook() {
            Ok(hook) => builder.hook(Box::new(hook)),
            Err(err) => {
                warn!("remote log sink disabled: {err}");
                builder
            }
        }
    }

    /// Builds the transport, delivery service (spawned), writer and hook.
    pub fn build_hook(&self) -> Result<SlsHook, BuildError> {
        self.validate()?;
        let transport = HttpTransport::new(
            &self.endpoint,
            &self.access_key,
            &self.access_secret,
            self.request_timeout,
        )?;
        let (service, handle) = DeliveryService::new(
            transport,
            RetryStrategy::default(),
            &self.log_store,
            self.queue_capacity,
        );
        tokio::spawn(service.run());
        let writer = Writer::new(&self.topic, self.mode, handle)
            .with_thresholds(self.max_records, self.max_bytes);
        Ok(SlsHook::new(Arc::new(writer)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn populated() -> SlsConfig {
        SlsConfig {
            endpoint: "https://logs.example.com".to_string(),
            access_key: "key".to_string(),
            access_secret: "secret".to_string(),
            log_store: "app".to_string(),
            topic: "orders".to_string(),
            ..Default::default()
        }
    }

    fn clear_env() {
        for var in [
            "SLS_ENDPOINT",
            "SLS_ACCESS_KEY",
            "SLS_ACCESS_SECRET",
            "SLS_LOG_STORE",
            "SLS_TOPIC",
            "SLS_MODE",
            "SLS_MAX_RECORDS",
            "SLS_MAX_BYTES",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_validate_populated_config() {
        assert!(populated().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let config = SlsConfig {
            endpoint: String::new(),
            ..populated()
        };
        assert!(config.validate().is_err());

        let config = SlsConfig {
            log_store: String::new(),
            ..populated()
        };
        assert!(config.validate().is_err());

        let config = SlsConfig {
            max_records: 0,
            ..populated()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env() {
        clear_env();
        env::set_var("SLS_ENDPOINT", "https://logs.example.com");
        env::set_var("SLS_ACCESS_KEY", "key");
        env::set_var("SLS_ACCESS_SECRET", "secret");
        env::set_var("SLS_LOG_STORE", "app");
        env::set_var("SLS_MODE", "sync");
        env::set_var("SLS_MAX_RECORDS", "10");

        let config = SlsConfig::from_env().unwrap();
        assert_eq!(config.mode, DeliveryMode::Synchronous);
        assert_eq!(config.max_records, 10);
        assert_eq!(config.max_bytes, DEFAULT_MAX_BYTES);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_requires_endpoint() {
        clear_env();
        env::set_var("SLS_ACCESS_KEY", "key");
        env::set_var("SLS_LOG_STORE", "app");
        assert!(SlsConfig::from_env().is_err());
        clear_env();
    }

    #[tokio::test]
    async fn test_register_with_bad_config_keeps_logger_usable() {
        // Endpoint missing: the remote sink is skipped, nothing panics, and
        // the logger still builds.
        let builder = SlsConfig::default().register(logship::Logger::builder());
        let logger = builder.build();
        logger.info("no remote sink attached");
    }
}
