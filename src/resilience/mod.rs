//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Outbound attempt:
//!     → timeouts.rs (connect/read deadline per attempt)
//!     → retries.rs  (retryable status? re-issue, up to max attempts)
//!     → backoff.rs  (optional delay between attempts)
//! ```
//!
//! # Design Decisions
//! - Every attempt gets its own timeout budget; no deadline spans attempts
//! - Only statuses are retried; transport errors propagate immediately
//! - Backoff is off by default, attempts are issued back to back

pub mod backoff;
pub mod retries;
pub mod timeouts;
