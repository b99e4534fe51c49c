//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, GET /greeting)
//!     → client::HelloClient (outbound call through the interceptor chain)
//!     → response.rs (map client errors to status codes)
//!     → Send to caller
//! ```

pub mod response;
pub mod server;

pub use server::HttpServer;
