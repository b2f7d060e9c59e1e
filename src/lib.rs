//! # podvisor
//!
//! **Podvisor** tracks the runtime lifecycle of a single workload hosted by a
//! cluster orchestration backend and exposes a uniform, thread-safe
//! status/control surface for it.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!             callers (status pollers, stream pumps, API handlers)
//!                 │              │                 │
//!                 ▼              ▼                 ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Environment (one per workload)                                   │
//! │  - AtomicState         (offline / starting / running / stopping)  │
//! │  - RwLock<Inner>       (metadata, configuration, console stream)  │
//! │  - Mutex<LogCallback>  (raw output delivery)                      │
//! └──────┬──────────────────────────────┬─────────────────────────────┘
//!        │ exists / is_running /        │ set_state ─► publish(StateChanged)
//!        │ exit_state                   ▼
//!        ▼                       ┌──────────────┐     listen()     ┌───────────────┐
//! ┌──────────────┐               │ Bus (Publish)│ ───────────────► │ SubscriberSet │
//! │   Backend    │               └──────────────┘                  └───────────────┘
//! │ (get by id)  │ ──► PodSnapshot ──► exit::translate ──► ExitStatus
//! └──────────────┘
//! ```
//!
//! ### State changes
//! ```text
//! set_state(next)
//!   ├─► AtomicState swap ──► Transition { from, to, changed }
//!   └─► changed ──► Publish::publish(Event::state_changed(id, next))
//! ```
//!
//! ## Features
//! | Area              | Description                                              | Key types / traits                        |
//! |-------------------|----------------------------------------------------------|-------------------------------------------|
//! | **Controller**    | Status queries, state machine, attachment tracking.      | [`Environment`], [`EnvironmentBuilder`]   |
//! | **State**         | Closed state enum and lock-free holder.                  | [`ProcessState`], [`AtomicState`]         |
//! | **Backend**       | Query seam to the orchestration system.                  | [`Backend`], [`PodSnapshot`]              |
//! | **Exit status**   | Termination record to exit code / OOM flag.              | [`exit::translate`], [`ExitStatus`]       |
//! | **Events**        | State-change announcements and fan-out.                  | [`Publish`], [`Bus`], [`Subscribe`]       |
//! | **Errors**        | Typed errors for backend and environment operations.     | [`BackendError`], [`EnvironmentError`]    |
//! | **Configuration** | Namespace, bus capacity, query timeout.                  | [`Settings`]                              |
//!
//! ## Optional features
//! - `logging`: exports a built-in [`LogWriter`] subscriber that logs events through `tracing`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use podvisor::{EnvironmentBuilder, MemoryBackend, Phase, PodSnapshot, ProcessState, Settings};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = Arc::new(MemoryBackend::new());
//!     backend.insert("default", PodSnapshot::new("srv-1", Phase::Running));
//!
//!     let env = EnvironmentBuilder::new("srv-1", backend, Settings::default()).build();
//!     let mut events = env.events().subscribe();
//!
//!     if env.is_running(&CancellationToken::new()).await? {
//!         env.set_state(ProcessState::Running);
//!     }
//!
//!     let ev = events.recv().await?;
//!     assert_eq!(ev.state, ProcessState::Running);
//!     assert_eq!(env.exit_state().await?.code, 1);
//!     Ok(())
//! }
//! ```
mod backend;
mod config;
mod environment;
mod error;
mod events;
mod state;
mod subscribers;

pub mod exit;

// ---- Public re-exports ----

pub use backend::{
    Backend, ContainerState, ContainerStatus, MemoryBackend, Phase, PodSnapshot, Terminated,
};
pub use config::Settings;
pub use environment::{
    Configuration, ConsoleStream, Environment, EnvironmentBuilder, Limits, LogCallback, Metadata,
    Mount, SharedConfiguration, StopConfiguration,
};
pub use error::{BackendError, EnvironmentError, InvalidState};
pub use events::{Bus, Event, EventKind, Publish};
pub use exit::ExitStatus;
pub use state::{AtomicState, ProcessState, Transition};
pub use subscribers::{Subscribe, SubscriberSet, listen};

// Optional: expose a simple built-in logger subscriber.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
