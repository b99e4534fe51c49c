//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Process start:
//!     → logging.rs (install subscriber: env filter + fmt/json layer)
//!
//! Every outbound call:
//!     → logging.rs (LoggingInterceptor: before/after markers)
//!     → tracing.rs (TracePropagationInterceptor: trace_id/span_id headers)
//! ```
//!
//! # Design Decisions
//! - Structured logging via the tracing crate
//! - Trace ids are generated per outbound call, not propagated from inbound

pub mod logging;
pub mod tracing;
