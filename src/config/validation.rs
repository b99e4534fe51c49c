//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, attempts > 0, status codes)
//! - Check the downstream URL is an absolute http URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::Uri;
use thiserror::Error;

use crate::config::schema::RelayConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("downstream.base_url {0:?} must be an absolute http:// URL")]
    BaseUrl(String),

    #[error("downstream.hello_path {0:?} must start with '/'")]
    HelloPath(String),

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("retries.max_attempts must be at least 1")]
    ZeroAttempts,

    #[error("retries.retryable_statuses contains invalid status {0}")]
    Status(u16),

    #[error("retries.max_delay_ms ({max}) is below retries.base_delay_ms ({base})")]
    DelayRange { base: u64, max: u64 },

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    LogLevel(String),
}

pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    let base_url = &config.downstream.base_url;
    let base_ok = base_url
        .parse::<Uri>()
        .map(|uri| uri.scheme_str() == Some("http") && uri.authority().is_some())
        .unwrap_or(false);
    if !base_ok {
        errors.push(ValidationError::BaseUrl(base_url.clone()));
    }

    if !config.downstream.hello_path.starts_with('/') {
        errors.push(ValidationError::HelloPath(config.downstream.hello_path.clone()));
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.read_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("read_secs"));
    }

    let retries = &config.retries;
    if retries.max_attempts == 0 {
        errors.push(ValidationError::ZeroAttempts);
    }
    for code in &retries.retryable_statuses {
        if !(100..=599).contains(code) {
            errors.push(ValidationError::Status(*code));
        }
    }
    if retries.base_delay_ms > 0 && retries.max_delay_ms < retries.base_delay_ms {
        errors.push(ValidationError::DelayRange {
            base: retries.base_delay_ms,
            max: retries.max_delay_ms,
        });
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
