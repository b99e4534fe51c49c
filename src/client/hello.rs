//! Client facade for the downstream greeting service.

use crate::client::{ClientError, RestClient, RestClientBuilder};
use crate::config::RelayConfig;
use crate::observability::logging::LoggingInterceptor;
use crate::observability::tracing::TracePropagationInterceptor;
use crate::resilience::retries::{RetryInterceptor, RetryPolicy};
use crate::resilience::timeouts::Timeouts;

/// Calls `GET {base_url}{hello_path}` through the standard chain:
/// logging, trace propagation, retry.
#[derive(Debug, Clone)]
pub struct HelloClient {
    rest: RestClient,
    path: String,
}

impl HelloClient {
    /// Wrap an already-built client.
    pub fn new(rest: RestClient, path: impl Into<String>) -> Self {
        Self {
            rest,
            path: path.into(),
        }
    }

    /// Build the client and its interceptor chain from configuration.
    pub fn from_config(config: &RelayConfig) -> Result<Self, ClientError> {
        let rest = Self::chain(RestClient::builder(&config.downstream.base_url), config)
            .timeouts(Timeouts::from(&config.timeouts))
            .build()?;
        Ok(Self::new(rest, &config.downstream.hello_path))
    }

    /// Register the standard interceptors, outermost first.
    pub fn chain(builder: RestClientBuilder, config: &RelayConfig) -> RestClientBuilder {
        builder
            .interceptor(LoggingInterceptor::default())
            .interceptor(TracePropagationInterceptor::default())
            .interceptor(RetryInterceptor::new(RetryPolicy::from(&config.retries)))
    }

    pub async fn hello(&self) -> Result<String, ClientError> {
        self.rest.get_text(&self.path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{Captured, ScriptedTransport};
    use crate::observability::tracing::{SPAN_ID, TRACE_ID};
    use crate::client::ClientRequest;
    use axum::http::{HeaderName, StatusCode};
    use std::sync::Arc;

    fn ids(request: &ClientRequest) -> (String, String) {
        let value = |name: &HeaderName| request.headers[name].to_str().unwrap().to_string();
        (value(&TRACE_ID), value(&SPAN_ID))
    }

    fn position(logs: &str, marker: &str) -> usize {
        logs.find(marker)
            .unwrap_or_else(|| panic!("no {marker:?} in:\n{logs}"))
    }

    fn hello_client(transport: Arc<ScriptedTransport>) -> HelloClient {
        let config = RelayConfig::default();
        let rest = HelloClient::chain(RestClient::builder(&config.downstream.base_url), &config)
            .transport(transport)
            .build()
            .unwrap();
        HelloClient::new(rest, &config.downstream.hello_path)
    }

    #[tokio::test]
    async fn hello_recovers_after_two_throttled_attempts() {
        let transport = Arc::new(ScriptedTransport::with_statuses(&[
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::OK,
        ]));
        let client = hello_client(transport.clone());

        assert_eq!(client.hello().await.unwrap(), "200");
        assert_eq!(transport.calls(), 3);
        let requests = transport.requests();
        assert_eq!(requests[0].uri, "http://localhost:8080/hello");
        assert!(requests.iter().all(|r| r.headers.contains_key("trace_id")));
    }

    #[tokio::test]
    async fn hello_fails_when_retries_run_out() {
        let transport = Arc::new(ScriptedTransport::with_statuses(&[StatusCode::TOO_MANY_REQUESTS]));
        let client = hello_client(transport.clone());

        let err = client.hello().await.unwrap_err();

        assert!(matches!(err, ClientError::RetriesExhausted { attempts: 3 }));
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test]
    async fn chain_runs_logging_then_trace_then_retry() {
        let captured = Captured::default();
        let _guard = captured.install();
        let transport = Arc::new(ScriptedTransport::with_statuses(&[
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::OK,
        ]));
        let client = hello_client(transport.clone());

        client.hello().await.unwrap();

        // Retries reuse the ids stamped once outside the retry loop.
        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        let first = ids(&requests[0]);
        assert_ne!(first.0, first.1);
        assert!(requests.iter().all(|r| ids(r) == first));

        let logs = captured.text();
        let sending = position(&logs, "Sending outbound request");
        let attaching = position(&logs, "Attaching trace context");
        let retrying = position(&logs, "Retryable response received");
        let completed = position(&logs, "Request completed");
        let round_trip = position(&logs, "Trace context round trip complete");
        let received = position(&logs, "Received outbound response");
        assert!(sending < attaching);
        assert!(attaching < retrying);
        assert!(retrying < completed);
        assert!(completed < round_trip);
        assert!(round_trip < received);
        assert_eq!(logs.matches("Attaching trace context").count(), 1);

        client.hello().await.unwrap();
        let requests = transport.requests();
        assert_eq!(requests.len(), 4);
        let second = ids(&requests[3]);
        assert_ne!(second.0, first.0);
        assert_ne!(second.1, first.1);
    }
}
