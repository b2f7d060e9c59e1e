//! # Backend workload records.
//!
//! A [`PodSnapshot`] is what a single lookup by identity returns: the coarse
//! [`Phase`] plus per-container state. Only the first container status is
//! consulted by the exit translator.

use serde::{Deserialize, Serialize};

/// Coarse lifecycle label reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Accepted, containers not started yet.
    Pending,
    /// Bound to a node with at least one container running.
    Running,
    /// All containers terminated successfully.
    Succeeded,
    /// All containers terminated, at least one in failure.
    Failed,
    /// The backend could not determine the phase.
    #[default]
    Unknown,
}

/// Detail of a terminated container.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Terminated {
    /// Raw exit code as reported (signed, as most backends report it).
    pub exit_code: i32,
    /// Signal number, if the backend reports one.
    pub signal: Option<i32>,
    /// Short machine-readable reason (e.g. `"OOMKilled"`, `"Error"`).
    pub reason: Option<String>,
}

impl Terminated {
    /// Creates a termination record with only an exit code.
    pub fn with_code(exit_code: i32) -> Self {
        Self {
            exit_code,
            ..Self::default()
        }
    }
}

/// Per-container state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerState {
    /// Not running yet (pulling image, crash loop backoff, ...).
    Waiting {
        /// Reason reported by the backend.
        reason: Option<String>,
    },
    /// Running.
    Running,
    /// Terminated with the given detail.
    Terminated(Terminated),
}

/// Status of one container inside the workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerStatus {
    /// Container name.
    pub name: String,
    /// Current container state.
    pub state: ContainerState,
}

impl ContainerStatus {
    /// Returns the termination detail if this container has terminated.
    pub fn terminated(&self) -> Option<&Terminated> {
        match &self.state {
            ContainerState::Terminated(t) => Some(t),
            _ => None,
        }
    }
}

/// A single-resource lookup result keyed by workload identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodSnapshot {
    /// Workload identity.
    pub name: String,
    /// Coarse lifecycle phase.
    pub phase: Phase,
    /// Container statuses in declaration order.
    pub container_statuses: Vec<ContainerStatus>,
}

impl PodSnapshot {
    /// Creates a snapshot with no container statuses.
    pub fn new(name: impl Into<String>, phase: Phase) -> Self {
        Self {
            name: name.into(),
            phase,
            container_statuses: Vec::new(),
        }
    }

    /// Appends a container status.
    pub fn with_container(mut self, name: impl Into<String>, state: ContainerState) -> Self {
        self.container_statuses.push(ContainerStatus {
            name: name.into(),
            state,
        });
        self
    }

    /// Returns `true` if the backend reports the running phase.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Termination detail of the first container, if it has terminated.
    pub fn first_terminated(&self) -> Option<&Terminated> {
        self.container_statuses.first().and_then(ContainerStatus::terminated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_terminated_ignores_later_containers() {
        let pod = PodSnapshot::new("srv", Phase::Running)
            .with_container("main", ContainerState::Running)
            .with_container("sidecar", ContainerState::Terminated(Terminated::with_code(2)));

        assert!(pod.is_running());
        assert!(pod.first_terminated().is_none());
    }

    #[test]
    fn test_first_terminated_reads_first_container() {
        let pod = PodSnapshot::new("srv", Phase::Failed)
            .with_container("main", ContainerState::Terminated(Terminated::with_code(3)));

        assert!(!pod.is_running());
        assert_eq!(pod.first_terminated().map(|t| t.exit_code), Some(3));
    }
}
