//! Trace context propagation to the downstream.
//!
//! # Responsibilities
//! - Stamp fresh `trace_id` and `span_id` headers on every outbound request
//!
//! # Design Decisions
//! - Identifiers are random UUID v4 strings, generated per call
//! - Existing values are overwritten, never appended
//! - No correlation with inbound requests

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue};
use tracing::{Instrument, Span};
use uuid::Uuid;

use crate::client::{ClientError, ClientRequest, ClientResponse, Interceptor, Next};
use crate::observability::logging::call_parent;

pub const TRACE_ID: HeaderName = HeaderName::from_static("trace_id");
pub const SPAN_ID: HeaderName = HeaderName::from_static("span_id");

#[derive(Debug, Clone)]
pub struct TracePropagationInterceptor {
    span: Span,
}

impl TracePropagationInterceptor {
    pub fn new(span: Span) -> Self {
        Self { span }
    }
}

impl Default for TracePropagationInterceptor {
    fn default() -> Self {
        Self::new(Span::none())
    }
}

fn random_id() -> Result<HeaderValue, ClientError> {
    HeaderValue::from_str(&Uuid::new_v4().to_string())
        .map_err(|e| ClientError::InvalidRequest(e.to_string()))
}

#[async_trait]
impl Interceptor for TracePropagationInterceptor {
    async fn intercept(
        &self,
        mut request: ClientRequest,
        next: Next<'_>,
    ) -> Result<ClientResponse, ClientError> {
        let trace_id = random_id()?;
        let span_id = random_id()?;
        let span = tracing::info_span!(parent: call_parent(&self.span), "trace_propagation");
        span.in_scope(|| {
            tracing::info!(trace_id = ?trace_id, span_id = ?span_id, "Attaching trace context");
        });

        request.headers.insert(TRACE_ID, trace_id);
        request.headers.insert(SPAN_ID, span_id);

        let response = next.run(request).instrument(span.clone()).await?;

        span.in_scope(|| {
            tracing::info!(status = %response.status, "Trace context round trip complete");
        });
        Ok(response)
    }
}
