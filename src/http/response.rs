//! Response mapping for the inbound endpoint.
//!
//! # Responsibilities
//! - Map outbound client errors to HTTP status codes
//!
//! # Design Decisions
//! - Downstream failures are 502, read timeouts 504
//! - Exhausted retries surface as 503: the downstream kept throttling
//! - Plain-text bodies; no structured error format

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::client::ClientError;

pub fn status_for(error: &ClientError) -> StatusCode {
    match error {
        ClientError::Transport(_) | ClientError::Status { .. } => StatusCode::BAD_GATEWAY,
        ClientError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        ClientError::RetriesExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
        ClientError::Decode(_) | ClientError::InvalidRequest(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ClientError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        tracing::error!(status = %status, error = %self, "Greeting request failed");
        (status, self.to_string()).into_response()
    }
}
