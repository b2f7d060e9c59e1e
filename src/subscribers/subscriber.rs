//! # Event subscriber trait.
//!
//! Provides [`Subscribe`], an extension point for reacting to environment events
//! delivered through a [`SubscriberSet`](crate::SubscriberSet).
//!
//! Subscribers are called in registration order, optionally restricted to a
//! single environment via [`Subscribe::environment`]. Panics are caught and
//! logged; the next subscriber still runs.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use podvisor::{Event, ProcessState, Subscribe};
//!
//! struct CrashAlert;
//!
//! #[async_trait]
//! impl Subscribe for CrashAlert {
//!     async fn on_event(&self, ev: &Event) {
//!         if ev.state == ProcessState::Offline {
//!             // page someone, etc.
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "crash-alert" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Event subscriber.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
/// - Keep processing short; delivery to later subscribers waits for it.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event. Events arrive in bus order.
    async fn on_event(&self, event: &Event);

    /// Returns the subscriber name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Restricts delivery to events from the environment with this id.
    ///
    /// Default: `None` (every environment on the bus).
    fn environment(&self) -> Option<&str> {
        None
    }
}
