use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use super::{
    configuration::{Configuration, SharedConfiguration},
    core::{Environment, Inner},
    metadata::Metadata,
};
use crate::{
    backend::Backend,
    config::Settings,
    events::{Bus, Publish},
    state::{AtomicState, ProcessState},
};

/// Builder for constructing an [`Environment`].
pub struct EnvironmentBuilder<P = Bus> {
    id: String,
    backend: Arc<dyn Backend>,
    settings: Settings,
    meta: Metadata,
    configuration: SharedConfiguration,
    publisher: P,
}

impl EnvironmentBuilder<Bus> {
    /// Creates a builder for the workload `id`, queried through `backend`.
    ///
    /// The workload does not need to exist yet. Events go to a fresh [`Bus`]
    /// sized by [`Settings::bus_capacity_clamped`].
    pub fn new(id: impl Into<String>, backend: Arc<dyn Backend>, settings: Settings) -> Self {
        let publisher = Bus::new(settings.bus_capacity_clamped());
        Self {
            id: id.into(),
            backend,
            settings,
            meta: Metadata::default(),
            configuration: Configuration::default().shared(),
            publisher,
        }
    }
}

impl<P: Publish> EnvironmentBuilder<P> {
    /// Sets the initial metadata (image, stop policy).
    pub fn with_metadata(mut self, meta: Metadata) -> Self {
        self.meta = meta;
        self
    }

    /// Shares an existing configuration handle with the environment.
    pub fn with_configuration(mut self, configuration: SharedConfiguration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Replaces the event channel state changes are published to.
    pub fn with_publisher<Q: Publish>(self, publisher: Q) -> EnvironmentBuilder<Q> {
        EnvironmentBuilder {
            id: self.id,
            backend: self.backend,
            settings: self.settings,
            meta: self.meta,
            configuration: self.configuration,
            publisher,
        }
    }

    /// Builds the environment in the `Offline` state with no stream attached.
    pub fn build(self) -> Arc<Environment<P>> {
        Arc::new(Environment {
            id: self.id.into(),
            settings: self.settings,
            backend: self.backend,
            publisher: self.publisher,
            inner: RwLock::new(Inner {
                configuration: self.configuration,
                meta: self.meta,
                stream: None,
            }),
            log_callback: Mutex::new(None),
            state: AtomicState::new(ProcessState::Offline),
        })
    }
}
