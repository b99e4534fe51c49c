//! Retry on retryable response statuses.
//!
//! # Responsibilities
//! - Re-issue the same request while the downstream answers with a
//!   retryable status (429 by default)
//! - Stop after `max_attempts` and fail with `RetriesExhausted`
//! - Optionally wait between attempts (see `backoff.rs`)
//!
//! # Design Decisions
//! - Any non-retryable status ends the loop, error statuses included
//! - The last retryable response is discarded on exhaustion
//! - Transport errors are not retried

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use axum::http::StatusCode;
use tracing::{Instrument, Span};

use crate::client::{ClientError, ClientRequest, ClientResponse, Interceptor, Next};
use crate::config::RetryConfig;
use crate::observability::logging::call_parent;
use crate::resilience::backoff::backoff_delay;

/// When and how often to re-issue a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub retryable_statuses: Vec<StatusCode>,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retryable_statuses: vec![StatusCode::TOO_MANY_REQUESTS],
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }
}

impl RetryPolicy {
    pub fn is_retryable(&self, status: StatusCode) -> bool {
        self.retryable_statuses.contains(&status)
    }

    /// Delay after a retryable response on `attempt`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        backoff_delay(attempt, self.base_delay, self.max_delay)
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            // Validation rejects out-of-range codes before we get here.
            retryable_statuses: config
                .retryable_statuses
                .iter()
                .filter_map(|code| StatusCode::from_u16(*code).ok())
                .collect(),
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
        }
    }
}

/// Innermost interceptor of the standard chain.
#[derive(Debug, Clone)]
pub struct RetryInterceptor {
    policy: RetryPolicy,
    span: Span,
}

impl RetryInterceptor {
    pub fn new(policy: RetryPolicy) -> Self {
        Self::with_span(policy, Span::none())
    }

    /// Open each call's span under `span`.
    pub fn with_span(policy: RetryPolicy, span: Span) -> Self {
        Self { policy, span }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

impl Default for RetryInterceptor {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

#[async_trait]
impl Interceptor for RetryInterceptor {
    async fn intercept(
        &self,
        request: ClientRequest,
        next: Next<'_>,
    ) -> Result<ClientResponse, ClientError> {
        let max_attempts = self.policy.max_attempts;
        let span = tracing::info_span!(parent: call_parent(&self.span), "retry");

        for attempt in 1..=max_attempts {
            let response = next
                .run(request.clone())
                .instrument(span.clone())
                .await?;

            if !self.policy.is_retryable(response.status) {
                span.in_scope(|| {
                    tracing::info!(attempt, status = %response.status, "Request completed");
                });
                return Ok(response);
            }

            span.in_scope(|| {
                tracing::info!(
                    attempt,
                    status = %response.status,
                    timestamp_ms = unix_millis(),
                    "Retryable response received"
                );
            });

            if attempt < max_attempts {
                let delay = self.policy.delay_after(attempt);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        }

        span.in_scope(|| {
            tracing::error!(attempts = max_attempts, "Retries exhausted");
        });
        Err(ClientError::RetriesExhausted {
            attempts: max_attempts,
        })
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
