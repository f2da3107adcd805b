// Copyright 2025-Present the logship authors
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};

use crate::errors::TransportError;

/// Capability boundary for the remote collector write. The shipping core
/// depends only on this trait; tests substitute fakes.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        method: Method,
        headers: HeaderMap,
        body: Bytes,
        resource: &str,
    ) -> Result<StatusCode, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(
        &self,
        method: Method,
        headers: HeaderMap,
        body: Bytes,
        resource: &str,
    ) -> Result<StatusCode, TransportError> {
        (**self).send(method, headers, body, resource).await
    }
}

/// HTTP implementation over reqwest: `POST <endpoint>/<resource>` with the
/// encoded envelope as the body. The header set is the pluggable-auth
/// placeholder; full request signing is a collector-specific concern that
/// lives behind this boundary.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    access_key: String,
    // Reserved for request signing.
    #[allow(dead_code)]
    access_secret: String,
}

impl HttpTransport {
    pub fn new(
        endpoint: &str,
        access_key: &str,
        access_secret: &str,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        if endpoint.is_empty() {
            return Err(TransportError::Endpoint("endpoint is empty".to_string()));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(HttpTransport {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            access_key: access_key.to_string(),
            access_secret: access_secret.to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        mut headers: HeaderMap,
        body: Bytes,
        resource: &str,
    ) -> Result<StatusCode, TransportError> {
        let url = format!("{}/{}", self.endpoint, resource);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/x-protobuf"));
        headers.insert("x-log-bodyrawsize", HeaderValue::from(body.len() as u64));
        let authorization = format!("LOG {}", self.access_key);
        headers.insert(
            "authorization",
            HeaderValue::from_str(&authorization)
                .map_err(|e| TransportError::Credentials(e.to_string()))?,
        );

        let response = self
            .client
            .request(method, &url)
            .headers(headers)
            .body(body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TransportError::Http {
                status: status.as_u16(),
                message,
            });
        }
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_posts_to_resource_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/logstores/app")
            .match_header("content-type", "application/x-protobuf")
            .match_header("x-log-bodyrawsize", "3")
            .with_status(200)
            .create_async()
            .await;

        let transport =
            HttpTransport::new(&server.url(), "key", "secret", Duration::from_secs(5)).unwrap();
        let status = transport
            .send(
                Method::POST,
                HeaderMap::new(),
                Bytes::from_static(b"abc"),
                "logstores/app",
            )
            .await
            .unwrap();

        assert_eq!(status, StatusCode::OK);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_error_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/logstores/app")
            .with_status(503)
            .with_body("overloaded")
            .create_async()
            .await;

        let transport =
            HttpTransport::new(&server.url(), "key", "secret", Duration::from_secs(5)).unwrap();
        let err = transport
            .send(
                Method::POST,
                HeaderMap::new(),
                Bytes::from_static(b"abc"),
                "logstores/app",
            )
            .await
            .unwrap_err();

        match err {
            TransportError::Http { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "overloaded");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        assert!(HttpTransport::new("", "key", "secret", Duration::from_secs(5)).is_err());
    }
}
