//! Exponential backoff with jitter between retry attempts.

use rand::Rng;
use std::time::Duration;

/// Delay before the attempt that follows `attempt` (1-based).
///
/// Doubles `base` per attempt, caps at `max`, then adds up to 10% jitter.
/// A zero `base` disables backoff entirely.
pub fn backoff_delay(attempt: u32, base: Duration, max: Duration) -> Duration {
    if attempt == 0 || base.is_zero() {
        return Duration::ZERO;
    }

    let base_ms = base.as_millis() as u64;
    let max_ms = (max.as_millis() as u64).max(base_ms);
    let exponential = 2u64.saturating_pow(attempt - 1);
    let capped = base_ms.saturating_mul(exponential).min(max_ms);

    let jitter_range = capped / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped + jitter)
}
