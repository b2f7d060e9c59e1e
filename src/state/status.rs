//! # Process lifecycle states.
//!
//! [`ProcessState`] is a closed enum: a value of this type is always one of the
//! four valid states, so controller operations taking it need no validation.
//! String input from outer layers goes through [`FromStr`](std::str::FromStr),
//! which rejects anything else with [`InvalidState`].
//!
//! ## Lifecycle
//! ```text
//! Offline ──► Starting ──► Running ──► Stopping ──► Offline
//!    ▲            │                                    │
//!    └────────────┴────────────────────────────────────┘
//! ```
//! The controller does not enforce the arrows; any state may follow any other.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidState;

/// Lifecycle state of a workload as tracked by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ProcessState {
    /// Not running; the initial state of every environment.
    #[default]
    Offline = 0,
    /// Start requested, workload not yet running.
    Starting = 1,
    /// Workload is running.
    Running = 2,
    /// Stop requested, workload still shutting down.
    Stopping = 3,
}

impl ProcessState {
    /// All states in declaration order.
    pub const ALL: [ProcessState; 4] = [
        ProcessState::Offline,
        ProcessState::Starting,
        ProcessState::Running,
        ProcessState::Stopping,
    ];

    /// Returns the wire/status string of this state.
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessState::Offline => "offline",
            ProcessState::Starting => "starting",
            ProcessState::Running => "running",
            ProcessState::Stopping => "stopping",
        }
    }

    #[inline]
    pub(crate) fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decodes the cell representation.
    ///
    /// Only values produced by [`as_u8`](Self::as_u8) are ever stored, so any
    /// other byte is a broken invariant.
    #[inline]
    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            0 => ProcessState::Offline,
            1 => ProcessState::Starting,
            2 => ProcessState::Running,
            3 => ProcessState::Stopping,
            other => unreachable!("state cell holds invalid discriminant {other}"),
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessState {
    type Err = InvalidState;

    /// Parses one of `offline`, `starting`, `running`, `stopping` (exact match).
    ///
    /// # Example
    /// ```
    /// use podvisor::ProcessState;
    ///
    /// assert_eq!("running".parse::<ProcessState>(), Ok(ProcessState::Running));
    /// assert!("paused".parse::<ProcessState>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProcessState::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| InvalidState {
                value: s.to_string(),
            })
    }
}
