//! Interceptor chain plumbing.
//!
//! # Design
//! An [`Interceptor`] wraps one outbound exchange: it receives the request and
//! a [`Next`] handle, forwards through `next.run(request)`, and may inspect the
//! response on the way back. `Next` walks a slice of interceptors and ends at
//! the [`Transport`], so the first registered interceptor is the outermost one.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use crate::client::{ClientError, ClientRequest, ClientResponse};

/// Request/response decorator around an outbound call.
#[async_trait]
pub trait Interceptor: Send + Sync {
    async fn intercept(
        &self,
        request: ClientRequest,
        next: Next<'_>,
    ) -> Result<ClientResponse, ClientError>;
}

/// Terminal step of the chain: performs the network exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ClientRequest) -> Result<ClientResponse, ClientError>;
}

/// Handle to the remainder of the chain.
///
/// `Next` is `Copy`, so an interceptor that needs to re-issue a request (the
/// retry interceptor) can run it more than once.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    transport: &'a dyn Transport,
    interceptors: &'a [Arc<dyn Interceptor>],
}

impl<'a> Next<'a> {
    pub(crate) fn new(transport: &'a dyn Transport, interceptors: &'a [Arc<dyn Interceptor>]) -> Self {
        Self {
            transport,
            interceptors,
        }
    }

    /// Forward the request to the next interceptor, or the transport if none remain.
    pub fn run(self, request: ClientRequest) -> BoxFuture<'a, Result<ClientResponse, ClientError>> {
        match self.interceptors.split_first() {
            Some((current, rest)) => current.intercept(request, Next::new(self.transport, rest)),
            None => self.transport.execute(request),
        }
    }
}

impl std::fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Next")
            .field("remaining", &self.interceptors.len())
            .finish()
    }
}
