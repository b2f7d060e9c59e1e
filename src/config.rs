//! # Environment runtime settings.
//!
//! Provides [`Settings`], centralized knobs shared by every environment built
//! from it: the backend namespace, the event bus capacity, and the backend
//! query timeout.
//!
//! Settings deserialize with serde, and every field has a default, so an empty
//! document is valid.
//!
//! ## Sentinel values
//! - `query_timeout_ms = 0` → no timeout (treated as `None` by [`Settings::query_timeout`])
//! - `bus_capacity = 0` → clamped to 1

use std::time::Duration;

use serde::Deserialize;

/// Global settings for environments.
///
/// ## Field semantics
/// - `namespace`: Backend namespace every lookup is scoped to
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped by Bus)
/// - `query_timeout_ms`: Timeout applied around each backend query (`0` = none)
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Backend namespace the workloads live in.
    pub namespace: String,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow receivers that lag behind more than `bus_capacity` messages will
    /// receive `Lagged` and skip older items.
    pub bus_capacity: usize,

    /// Timeout for a single backend query, in milliseconds.
    ///
    /// - `0` = no timeout (the backend's own deadline applies)
    /// - `> 0` = `exists`, `is_running` and `exit_state` fail with
    ///   `BackendError::Timeout` once it elapses
    pub query_timeout_ms: u64,
}

impl Settings {
    /// Returns the backend query timeout as an `Option`.
    ///
    /// - `None` → no timeout
    /// - `Some(d)` → timeout applied per query
    #[inline]
    pub fn query_timeout(&self) -> Option<Duration> {
        if self.query_timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.query_timeout_ms))
        }
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Settings {
    /// Default settings:
    ///
    /// - `namespace = "default"`
    /// - `bus_capacity = 1024`
    /// - `query_timeout_ms = 0` (no timeout)
    fn default() -> Self {
        Self {
            namespace: "default".to_string(),
            bus_capacity: 1024,
            query_timeout_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let s: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.query_timeout(), None);
    }

    #[test]
    fn test_partial_document() {
        let s: Settings =
            serde_json::from_str(r#"{"namespace":"games","query_timeout_ms":2500}"#).unwrap();
        assert_eq!(s.namespace, "games");
        assert_eq!(s.bus_capacity, 1024);
        assert_eq!(s.query_timeout(), Some(Duration::from_millis(2500)));
    }

    #[test]
    fn test_bus_capacity_clamped() {
        let s = Settings {
            bus_capacity: 0,
            ..Settings::default()
        };
        assert_eq!(s.bus_capacity_clamped(), 1);
    }
}
