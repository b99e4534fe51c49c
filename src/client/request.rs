//! Outbound request and response values.
//!
//! Both types are plain data built on `axum::http` primitives so that
//! interceptors can inspect and rewrite them without touching the network.

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, Uri};
use bytes::Bytes;

use crate::client::ClientError;

/// An outbound request as seen by interceptors.
#[derive(Debug, Clone)]
pub struct ClientRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ClientRequest {
    /// Create a request with no headers and an empty body.
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// Convert into a hyper request for the transport.
    pub(crate) fn into_http(self) -> Result<Request<Body>, ClientError> {
        let mut builder = Request::builder().method(self.method).uri(self.uri);
        if let Some(headers) = builder.headers_mut() {
            headers.extend(self.headers);
        }
        builder
            .body(Body::from(self.body))
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))
    }
}

/// A fully buffered response.
#[derive(Debug, Clone)]
pub struct ClientResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ClientResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Decode the body as text, failing on non-2xx statuses.
    pub fn into_text(self) -> Result<String, ClientError> {
        if !self.status.is_success() {
            return Err(ClientError::Status {
                status: self.status,
                body: String::from_utf8_lossy(&self.body).into_owned(),
            });
        }
        String::from_utf8(self.body.to_vec()).map_err(|e| ClientError::Decode(e.to_string()))
    }
}
