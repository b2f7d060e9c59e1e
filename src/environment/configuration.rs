//! # Execution configuration.
//!
//! [`Configuration`] is owned by the caller and shared with the environment as
//! a [`SharedConfiguration`]. The environment stores the handle, never a copy:
//! edits made through a handle returned by `Environment::config()` are seen by
//! every other holder.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Shared, lock-guarded configuration handle.
pub type SharedConfiguration = Arc<RwLock<Configuration>>;

/// Resource limits applied to the workload.
///
/// Zero means "unlimited" for every numeric field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Memory limit in MiB.
    pub memory_mib: u64,
    /// Swap limit in MiB.
    pub swap_mib: u64,
    /// CPU limit as a percentage of one core (100 = one core).
    pub cpu_percent: u64,
    /// Block IO weight (10..=1000).
    pub io_weight: u16,
    /// Maximum number of threads/processes.
    pub threads: u64,
    /// Disable the out-of-memory killer.
    pub oom_disabled: bool,
}

/// A volume mounted into the workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mount {
    /// Path on the host or volume name.
    pub source: String,
    /// Path inside the workload.
    pub target: String,
    /// Mount read-only.
    #[serde(default)]
    pub read_only: bool,
}

/// Execution parameters of a workload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Resource ceilings applied to the workload.
    pub limits: Limits,
    /// Host paths or volumes mounted into the workload.
    pub mounts: Vec<Mount>,
    /// Environment variables passed to the workload.
    pub env: BTreeMap<String, String>,
    /// Labels attached to the workload on the backend.
    pub labels: BTreeMap<String, String>,
}

impl Configuration {
    /// Wraps this configuration in a shared handle.
    pub fn shared(self) -> SharedConfiguration {
        Arc::new(RwLock::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document() {
        let cfg: Configuration = serde_json::from_str(
            r#"{
                "limits": {"memory_mib": 2048, "oom_disabled": true},
                "mounts": [{"source": "/srv/data", "target": "/data"}],
                "env": {"SERVER_PORT": "25565"}
            }"#,
        )
        .unwrap();

        assert_eq!(cfg.limits.memory_mib, 2048);
        assert!(cfg.limits.oom_disabled);
        assert_eq!(cfg.limits.cpu_percent, 0);
        assert!(!cfg.mounts[0].read_only);
        assert_eq!(cfg.env.get("SERVER_PORT").map(String::as_str), Some("25565"));
        assert!(cfg.labels.is_empty());
    }

    #[test]
    fn test_shared_handle_sees_edits() {
        let shared = Configuration::default().shared();
        let other = Arc::clone(&shared);

        other.write().limits.threads = 64;

        assert_eq!(shared.read().limits.threads, 64);
    }
}
