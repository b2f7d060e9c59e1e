//! Orchestration backend: query trait, records, and an in-memory implementation.
//!
//! ## Contents
//! - [`Backend`] single-resource lookup by workload identity within a namespace
//! - [`PodSnapshot`], [`Phase`], [`ContainerStatus`], [`ContainerState`], [`Terminated`]
//! - [`MemoryBackend`] map-backed implementation with failure/delay injection

mod accessor;
mod memory;
mod record;

pub use accessor::Backend;
pub use memory::MemoryBackend;
pub use record::{ContainerState, ContainerStatus, Phase, PodSnapshot, Terminated};
