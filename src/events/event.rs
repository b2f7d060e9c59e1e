//! # Events emitted by an environment.
//!
//! The controller publishes a single kind of event, [`EventKind::StateChanged`],
//! carrying the new [`ProcessState`] as payload.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use podvisor::{Event, EventKind, ProcessState};
//!
//! let ev = Event::state_changed("srv-1", ProcessState::Running);
//!
//! assert_eq!(ev.kind, EventKind::StateChanged);
//! assert_eq!(ev.kind.topic(), "state change");
//! assert_eq!(&*ev.environment, "srv-1");
//! assert_eq!(ev.state, ProcessState::Running);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::state::ProcessState;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of environment events.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The environment moved to a different state.
    ///
    /// Sets:
    /// - `environment`: workload identity
    /// - `state`: the new state
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    StateChanged,
}

impl EventKind {
    /// Returns the topic string this kind is published under.
    pub fn topic(self) -> &'static str {
        match self {
            EventKind::StateChanged => "state change",
        }
    }
}

/// Environment event with metadata.
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Identity of the environment that emitted the event.
    pub environment: Arc<str>,
    /// Payload: the state the environment moved to.
    pub state: ProcessState,
}

impl Event {
    /// Creates a new event with current timestamp and next sequence number.
    pub fn new(kind: EventKind, environment: impl Into<Arc<str>>, state: ProcessState) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            environment: environment.into(),
            state,
        }
    }

    /// Creates a state-change event.
    #[inline]
    pub fn state_changed(environment: impl Into<Arc<str>>, state: ProcessState) -> Self {
        Self::new(EventKind::StateChanged, environment, state)
    }

    #[inline]
    pub fn is_state_change(&self) -> bool {
        matches!(self.kind, EventKind::StateChanged)
    }
}
