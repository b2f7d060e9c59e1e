//! Environment lifecycle controller.
//!
//! ## Contents
//! - [`Environment`] status/control surface for one workload
//! - [`EnvironmentBuilder`] wiring of identity, backend, settings and event channel
//! - [`Metadata`], [`StopConfiguration`] controller-owned record
//! - [`Configuration`], [`SharedConfiguration`] caller-owned execution parameters
//! - [`ConsoleStream`], [`LogCallback`] attachment seams used by stream pumps

mod builder;
mod configuration;
mod core;
mod metadata;
mod stream;

pub use builder::EnvironmentBuilder;
pub use configuration::{Configuration, Limits, Mount, SharedConfiguration};
pub use core::Environment;
pub use metadata::{Metadata, StopConfiguration};
pub use stream::{ConsoleStream, LogCallback};
