//! Outbound HTTP client subsystem.
//!
//! # Data Flow
//! ```text
//! HelloClient::hello()
//!     → rest.rs (resolve path against base URL, build ClientRequest)
//!     → interceptor.rs (walk the chain, outermost first)
//!         → observability::logging   (before/after markers)
//!         → observability::tracing   (trace_id / span_id headers)
//!         → resilience::retries      (re-issue on 429)
//!     → transport.rs (connect + read timeouts, buffer body)
//!     ← response unwinds in reverse order
//!     → request.rs (status check, UTF-8 decode)
//! ```
//!
//! # Design Decisions
//! - Interceptors are trait objects registered once at build time
//! - The transport is a trait so the chain can be tested without a network
//! - Bodies are buffered; the greeting payload is small

pub mod error;
pub mod hello;
pub mod interceptor;
pub mod request;
pub mod rest;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use error::ClientError;
pub use hello::HelloClient;
pub use interceptor::{Interceptor, Next, Transport};
pub use request::{ClientRequest, ClientResponse};
pub use rest::{RestClient, RestClientBuilder};
pub use transport::HyperTransport;
