//! Error types for outbound calls.

use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;

/// Errors surfaced by the outbound client and its interceptors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection could not be established, or broke mid-exchange.
    #[error("transport error: {0}")]
    Transport(String),

    /// The exchange did not complete within the read timeout.
    #[error("read timed out after {0:?}")]
    Timeout(Duration),

    /// Every attempt returned a retryable status.
    #[error("exceeded number of retries after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    /// The final response carried a non-success status.
    #[error("downstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The response body was not valid UTF-8.
    #[error("response body is not valid text: {0}")]
    Decode(String),

    /// The request URI or a header value could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<hyper_util::client::legacy::Error> for ClientError {
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        // The legacy client's Display only says "client error (Connect)";
        // the useful detail lives in the source chain.
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        ClientError::Transport(message)
    }
}
