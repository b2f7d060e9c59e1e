//! Process state: the closed status enum and its lock-free holder.
//!
//! ## Contents
//! - [`ProcessState`] the four lifecycle states (offline / starting / running / stopping)
//! - [`AtomicState`] a linearizable cell holding the current state
//! - [`Transition`] descriptor returned by a store (`from`, `to`, `changed`)
//!
//! ## Quick wiring
//! ```text
//! Environment::set_state(next)
//!      └─► AtomicState::transition(next) ─► Transition { from, to, changed }
//!                                              └─ changed ─► Publish::publish(StateChanged)
//! ```

mod cell;
mod status;

pub use cell::{AtomicState, Transition};
pub use status::ProcessState;
