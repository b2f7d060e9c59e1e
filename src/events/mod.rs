//! Environment events: types, the publish seam, and the broadcast bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Publish`] the capability an environment needs to announce transitions
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`, the default [`Publish`]
//!
//! ## Quick reference
//! - **Publishers**: `Environment::set_state` (one event per actual transition).
//! - **Consumers**: `subscribers::listen` (fans out to a `SubscriberSet`) or any
//!   direct `Bus::subscribe()` caller.

mod bus;
mod event;

pub use bus::{Bus, Publish};
pub use event::{Event, EventKind};
