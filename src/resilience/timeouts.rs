//! Per-attempt timeout budget for outbound calls.

use std::time::Duration;

use crate::config::TimeoutConfig;

/// Connect and read deadlines applied to every attempt independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Time allowed to establish the TCP connection.
    pub connect: Duration,
    /// Time allowed for the request/response exchange, body included.
    pub read: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(1),
            read: Duration::from_secs(5),
        }
    }
}

impl From<&TimeoutConfig> for Timeouts {
    fn from(config: &TimeoutConfig) -> Self {
        Self {
            connect: Duration::from_secs(config.connect_secs),
            read: Duration::from_secs(config.read_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_config_defaults() {
        assert_eq!(Timeouts::from(&TimeoutConfig::default()), Timeouts::default());
    }
}
