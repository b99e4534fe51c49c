//! Network transport backed by the hyper-util legacy client.
//!
//! # Responsibilities
//! - Enforce the connect timeout on the connector
//! - Enforce the read timeout around the exchange and body read
//! - Buffer the response body (capped at `body_limit`) so interceptors see
//!   plain bytes

use async_trait::async_trait;
use axum::body::Body;
use hyper::{body::Incoming, Response};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::time::Duration;

use crate::client::{ClientError, ClientRequest, ClientResponse, Transport};
use crate::resilience::timeouts::Timeouts;

/// Largest downstream body buffered by default.
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// HTTP/1.1 transport over plain TCP.
#[derive(Clone)]
pub struct HyperTransport {
    client: Client<HttpConnector, Body>,
    read_timeout: Duration,
    body_limit: usize,
}

impl HyperTransport {
    pub fn new(timeouts: &Timeouts) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(timeouts.connect));

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            client,
            read_timeout: timeouts.read,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Fail responses whose body exceeds `limit` bytes.
    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport")
            .field("read_timeout", &self.read_timeout)
            .field("body_limit", &self.body_limit)
            .finish()
    }
}

#[async_trait]
impl Transport for HyperTransport {
    async fn execute(&self, request: ClientRequest) -> Result<ClientResponse, ClientError> {
        let request = request.into_http()?;

        let exchange = async {
            let response: Response<Incoming> = self.client.request(request).await?;
            let (parts, body) = response.into_parts();
            let body = axum::body::to_bytes(Body::new(body), self.body_limit)
                .await
                .map_err(|e| {
                    ClientError::Transport(format!(
                        "failed to read response body (limit {} bytes): {e}",
                        self.body_limit
                    ))
                })?;
            Ok::<_, ClientError>(ClientResponse {
                status: parts.status,
                headers: parts.headers,
                body,
            })
        };

        match tokio::time::timeout(self.read_timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout(self.read_timeout)),
        }
    }
}
