//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] delivery list
//! and the [`listen`] loop that feeds it from a [`Bus`](crate::Bus).
//!
//! ## Architecture
//! ```text
//! Environment ── publish(Event) ──► Bus ──► listen() ──► SubscriberSet::deliver(&Event)
//!                                                           │
//!                                                 ┌─────────┼─────────┐
//!                                                 ▼         ▼         ▼
//!                                             LogWriter   Metrics   Custom
//! ```

#[cfg(feature = "logging")]
mod log;
mod listen;
mod set;
mod subscriber;

pub use listen::listen;
#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
