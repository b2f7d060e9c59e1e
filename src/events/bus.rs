//! # Event bus for broadcasting environment events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] and the default
//! [`Publish`] implementation used by an environment.
//!
//! ## Architecture
//! ```text
//! Publishers (many):                      Receivers (many):
//!   Environment A ──┐                 ┌──► subscribers::listen ──► SubscriberSet
//!   Environment B ──┼──► Bus ─────────┤
//!   Environment N ──┘ (broadcast)     └──► any other bus.subscribe() caller
//! ```
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks; it calls `broadcast::Sender::send`.
//! - **Bounded capacity**: a single ring buffer stores recent events for all receivers.
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip `n` oldest items.
//! - **No persistence**: events are lost if there are no active subscribers at send time.

use tokio::sync::broadcast;

use super::event::Event;

/// Publishing side of an event channel.
///
/// The environment calls [`publish`](Publish::publish) synchronously from
/// `set_state`; if an implementation blocks, `set_state` blocks with it.
pub trait Publish: Send + Sync + 'static {
    /// Announces `event` to whoever listens on this channel.
    fn publish(&self, event: Event);
}

/// Broadcast channel for environment events.
///
/// ### Properties
/// - **Non-blocking**: `publish()` returns immediately (send clones internally).
/// - **Fire-and-forget**: no delivery or durability guarantees.
/// - **Cloneable**: cheap to clone (internally holds an `Arc`-backed sender).
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity.
    ///
    /// The minimum capacity is 1 (clamped).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<Event>(capacity);
        Self { tx }
    }

    /// Creates a new receiver that will observe subsequent events.
    ///
    /// - Each call creates an **independent** receiver.
    /// - A receiver only gets events **sent after** it subscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }

    /// Number of live receivers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl Publish for Bus {
    /// If there are no receivers, the event is dropped.
    fn publish(&self, event: Event) {
        let _ = self.tx.send(event);
    }
}
