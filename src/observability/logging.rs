//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global subscriber from configuration
//! - Log before/after markers around every outbound exchange
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the configured level
//! - JSON format for production, pretty format for development
//! - Interceptors receive their span at construction instead of reaching
//!   for a global logger, so a test can hand in its own
//! - Every call opens a fresh child span: under the injected span when one
//!   is enabled, otherwise under the caller's current span (the inbound
//!   request span when serving `/greeting`)

use async_trait::async_trait;
use tracing::{Id, Instrument, Span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::client::{ClientError, ClientRequest, ClientResponse, Interceptor, Next};
use crate::config::ObservabilityConfig;

/// Install the global tracing subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "greeting_relay={level},tower_http={level}",
            level = config.log_level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Parent for a per-call span.
pub(crate) fn call_parent(injected: &Span) -> Option<Id> {
    injected.id().or_else(|| Span::current().id())
}

/// Outermost interceptor: logs around the exchange, never mutates.
#[derive(Debug, Clone)]
pub struct LoggingInterceptor {
    span: Span,
}

impl LoggingInterceptor {
    pub fn new(span: Span) -> Self {
        Self { span }
    }
}

impl Default for LoggingInterceptor {
    fn default() -> Self {
        Self::new(Span::none())
    }
}

#[async_trait]
impl Interceptor for LoggingInterceptor {
    async fn intercept(
        &self,
        request: ClientRequest,
        next: Next<'_>,
    ) -> Result<ClientResponse, ClientError> {
        let span = tracing::info_span!(parent: call_parent(&self.span), "outbound");
        span.in_scope(|| {
            tracing::info!(method = %request.method, uri = %request.uri, "Sending outbound request");
        });

        let response = next.run(request).instrument(span.clone()).await?;

        span.in_scope(|| {
            tracing::info!(status = %response.status, "Received outbound response");
        });
        Ok(response)
    }
}
