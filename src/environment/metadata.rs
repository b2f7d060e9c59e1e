//! # Environment metadata.
//!
//! [`Metadata`] is owned by the environment and mutated only through its
//! setters; [`StopConfiguration`] describes how the workload should be asked
//! to stop and is stored verbatim.

use serde::{Deserialize, Serialize};

/// How a workload is asked to stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StopConfiguration {
    /// Deliver a signal (e.g. `SIGTERM`).
    Signal {
        /// Signal name.
        value: String,
    },
    /// Write a command to the console stream (e.g. `stop`).
    Command {
        /// Command line, without trailing newline.
        value: String,
    },
    /// Let the backend stop the workload its own way.
    Native,
}

impl Default for StopConfiguration {
    fn default() -> Self {
        StopConfiguration::Signal {
            value: "SIGTERM".to_string(),
        }
    }
}

/// Mutable per-environment record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Image the workload runs, for display.
    pub image: String,
    /// Stop policy.
    pub stop: StopConfiguration,
}

impl Metadata {
    /// Creates metadata for `image` stopped according to `stop`.
    pub fn new(image: impl Into<String>, stop: StopConfiguration) -> Self {
        Self {
            image: image.into(),
            stop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_configuration_wire_shape() {
        let stop: StopConfiguration =
            serde_json::from_str(r#"{"type":"command","value":"stop"}"#).unwrap();
        assert_eq!(
            stop,
            StopConfiguration::Command {
                value: "stop".into()
            }
        );

        let native: StopConfiguration = serde_json::from_str(r#"{"type":"native"}"#).unwrap();
        assert_eq!(native, StopConfiguration::Native);
    }
}
