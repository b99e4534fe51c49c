//! Greeting relay library.
//!
//! Serves `GET /greeting` by calling a downstream `GET /hello` through an
//! interceptor chain: logging, trace-id propagation, retry on 429.

pub mod client;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use client::{ClientError, HelloClient, Interceptor, Next, RestClient};
pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
