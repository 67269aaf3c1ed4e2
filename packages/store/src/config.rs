//! # Resilience configuration for the data-access layer
//!
//! Deserialized from the `[resilience]` table of the application settings:
//!
//! ```toml
//! [resilience]
//! health_ttl_secs = 30    # how long a reachability check is trusted
//! ping_timeout_ms = 2000  # bound on a single reachability check
//! attempts = 3            # tries per operation against the document store
//! base_delay_ms = 100     # backoff before the 2nd try; doubles each time
//! ```
//!
//! All fields have defaults so a missing table is equivalent to the
//! default configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResilienceConfig {
    #[serde(default = "default_health_ttl")]
    pub health_ttl_secs: u64,
    #[serde(default = "default_ping_timeout")]
    pub ping_timeout_ms: u64,
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    #[serde(default = "default_base_delay")]
    pub base_delay_ms: u64,
}

fn default_health_ttl() -> u64 {
    30
}

fn default_ping_timeout() -> u64 {
    2000
}

fn default_attempts() -> u32 {
    3
}

fn default_base_delay() -> u64 {
    100
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            health_ttl_secs: default_health_ttl(),
            ping_timeout_ms: default_ping_timeout(),
            attempts: default_attempts(),
            base_delay_ms: default_base_delay(),
        }
    }
}

impl ResilienceConfig {
    pub fn health_ttl(&self) -> Duration {
        Duration::from_secs(self.health_ttl_secs)
    }

    pub fn ping_timeout(&self) -> Duration {
        Duration::from_millis(self.ping_timeout_ms)
    }

    /// Delay before retry number `retry` (0-based): `base * 2^retry`.
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 1u64.checked_shl(retry).unwrap_or(u64::MAX);
        Duration::from_millis(self.base_delay_ms.saturating_mul(factor))
    }

    /// Builder method to set the retry policy.
    pub fn with_retries(mut self, attempts: u32, base_delay_ms: u64) -> Self {
        self.attempts = attempts;
        self.base_delay_ms = base_delay_ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles() {
        let config = ResilienceConfig::default();
        assert_eq!(config.backoff(0), Duration::from_millis(100));
        assert_eq!(config.backoff(1), Duration::from_millis(200));
        assert_eq!(config.backoff(3), Duration::from_millis(800));
    }

    #[test]
    fn test_partial_table_uses_defaults() {
        let config: ResilienceConfig = serde_json::from_str(r#"{"attempts": 5}"#).unwrap();
        assert_eq!(config.attempts, 5);
        assert_eq!(config.health_ttl(), Duration::from_secs(30));
    }
}
