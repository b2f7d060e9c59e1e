//! # Environment: lifecycle controller for one workload.
//!
//! ## Synchronization
//! ```text
//! Environment
//!   ├─ inner: RwLock<Inner>            metadata, configuration handle, console stream
//!   │     readers: config(), metadata(), is_attached(), send_command()
//!   │     writers: set_image(), set_stop_configuration(), set_configuration(), set_stream()
//!   ├─ state: AtomicState              state(), set_state(), transition()  (lock-free)
//!   └─ log_callback: Mutex<Option<..>> set_log_callback(), emit_log()
//! ```
//! The three domains are independent. Backend queries (`exists`, `is_running`,
//! `exit_state`) hold none of them.
//!
//! ## State changes
//! ```text
//! set_state(next)
//!   ├─► transition(next): atomic swap ─► Transition { from, to, changed }
//!   └─► changed ? publish(StateChanged{ to }) : nothing
//! ```
//! The store happens before the publish, so a listener calling `state()` on
//! receipt sees the new value.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{
    configuration::SharedConfiguration,
    metadata::{Metadata, StopConfiguration},
    stream::{ConsoleStream, LogCallback},
};
use crate::{
    backend::{Backend, PodSnapshot},
    config::Settings,
    error::{BackendError, EnvironmentError},
    events::{Bus, Event, Publish},
    exit::{self, ExitStatus},
    state::{AtomicState, ProcessState, Transition},
};

/// Backend type label used in logs.
const KIND: &str = "kubernetes";

/// State guarded by the general read/write lock.
pub(super) struct Inner {
    pub(super) configuration: SharedConfiguration,
    pub(super) meta: Metadata,
    pub(super) stream: Option<Arc<dyn ConsoleStream>>,
}

/// Tracks the lifecycle of a single workload on the orchestration backend.
///
/// Safe to share across threads (`Arc<Environment>`); every method takes `&self`.
/// Build one with [`EnvironmentBuilder`](crate::EnvironmentBuilder).
pub struct Environment<P = Bus> {
    pub(super) id: Arc<str>,
    pub(super) settings: Settings,
    pub(super) backend: Arc<dyn Backend>,
    pub(super) publisher: P,
    pub(super) inner: RwLock<Inner>,
    pub(super) log_callback: Mutex<Option<LogCallback>>,
    pub(super) state: AtomicState,
}

impl<P: Publish> Environment<P> {
    /// Workload identity used for every backend lookup.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Backend type label.
    pub fn kind(&self) -> &'static str {
        KIND
    }

    /// Settings this environment was built with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Event channel state changes are published to.
    pub fn events(&self) -> &P {
        &self.publisher
    }

    // ---- Backend queries ----

    /// Reports whether the workload exists on the backend.
    ///
    /// A not-found lookup yields `Ok(false)`; any other failure is returned as is.
    pub async fn exists(&self) -> Result<bool, BackendError> {
        match self.query(&CancellationToken::new()).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => {
                debug!(environment = KIND, container_id = %self.id, "workload does not exist");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Reports whether the backend puts the workload in the running phase.
    ///
    /// `ctx` is handed to the backend and also raced here; if it fires first the
    /// result is [`BackendError::Canceled`]. A missing workload is an error.
    pub async fn is_running(&self, ctx: &CancellationToken) -> Result<bool, BackendError> {
        let pod = self.query(ctx).await?;
        Ok(pod.is_running())
    }

    /// Returns the workload's exit code and whether it was OOM-killed.
    ///
    /// A workload the backend cannot find is reported as exit code 1, not OOM.
    /// See [`exit::translate`] for the rest.
    pub async fn exit_state(&self) -> Result<ExitStatus, BackendError> {
        match self.query(&CancellationToken::new()).await {
            Ok(pod) => Ok(exit::translate(&pod)),
            Err(e) if e.is_not_found() => {
                debug!(
                    environment = KIND,
                    container_id = %self.id,
                    "workload missing while reading exit state; assuming failure"
                );
                Ok(ExitStatus::UNKNOWN)
            }
            Err(e) => Err(e),
        }
    }

    /// Single lookup with the configured timeout and `ctx` cancellation applied.
    async fn query(&self, ctx: &CancellationToken) -> Result<PodSnapshot, BackendError> {
        let lookup = async {
            tokio::select! {
                biased;
                _ = ctx.cancelled() => Err(BackendError::Canceled),
                res = self.backend.get(&self.settings.namespace, &self.id, ctx) => res,
            }
        };

        let res = match self.settings.query_timeout() {
            Some(dur) => match time::timeout(dur, lookup).await {
                Ok(r) => r,
                Err(_elapsed) => Err(BackendError::Timeout { timeout: dur }),
            },
            None => lookup.await,
        };

        if let Err(e) = &res
            && !e.is_not_found()
        {
            warn!(
                environment = KIND,
                container_id = %self.id,
                backend = self.backend.name(),
                error = %e,
                label = e.as_label(),
                "backend query failed"
            );
        }
        res
    }

    // ---- State ----

    /// Returns the current state. Never blocks.
    #[inline]
    pub fn state(&self) -> ProcessState {
        self.state.load()
    }

    /// Stores `next` without announcing it.
    ///
    /// Callers that use this directly are responsible for publishing when
    /// `changed` is set; [`set_state`](Self::set_state) does both.
    pub fn transition(&self, next: ProcessState) -> Transition {
        self.state.transition(next)
    }

    /// Moves the environment to `next`, publishing a state-change event if it differs
    /// from the current state.
    ///
    /// Only the store is atomic. Two callers setting different states at once may
    /// publish in the opposite order to their stores, and `Event::seq` follows
    /// publish order. Listeners that need the latest value should re-read `state()`.
    pub fn set_state(&self, next: ProcessState) {
        let t = self.transition(next);
        if !t.changed {
            return;
        }
        debug!(
            environment = KIND,
            container_id = %self.id,
            from = %t.from,
            to = %t.to,
            "state changed"
        );
        self.publisher
            .publish(Event::state_changed(Arc::clone(&self.id), t.to));
    }

    /// String form of [`set_state`](Self::set_state) for callers holding raw status values.
    ///
    /// # Panics
    /// Panics if `raw` is not one of `offline`, `starting`, `running`, `stopping`.
    /// An unknown status is a caller bug, not a runtime condition.
    pub fn set_state_raw(&self, raw: &str) {
        match raw.parse::<ProcessState>() {
            Ok(next) => self.set_state(next),
            Err(e) => panic!("{e}"),
        }
    }

    // ---- Metadata & configuration ----

    /// Returns a copy of the current metadata.
    pub fn metadata(&self) -> Metadata {
        self.inner.read().meta.clone()
    }

    /// Replaces the stop policy.
    pub fn set_stop_configuration(&self, stop: StopConfiguration) {
        self.inner.write().meta.stop = stop;
    }

    /// Replaces the display image.
    pub fn set_image(&self, image: impl Into<String>) {
        let image = image.into();
        self.inner.write().meta.image = image;
    }

    /// Returns the shared configuration handle (not a copy).
    pub fn config(&self) -> SharedConfiguration {
        Arc::clone(&self.inner.read().configuration)
    }

    /// Swaps the configuration handle.
    pub fn set_configuration(&self, configuration: SharedConfiguration) {
        self.inner.write().configuration = configuration;
    }

    // ---- Console stream ----

    /// Records the console stream; `None` marks the workload as detached.
    ///
    /// Returns the stream that was replaced, if any. Closing it is the caller's job.
    pub fn set_stream(
        &self,
        stream: Option<Arc<dyn ConsoleStream>>,
    ) -> Option<Arc<dyn ConsoleStream>> {
        let attached = stream.is_some();
        let prev = std::mem::replace(&mut self.inner.write().stream, stream);
        debug!(environment = KIND, container_id = %self.id, attached, "console stream set");
        prev
    }

    /// Returns `true` while a console stream is recorded.
    pub fn is_attached(&self) -> bool {
        self.inner.read().stream.is_some()
    }

    /// Writes `command` followed by a newline to the attached console.
    pub async fn send_command(&self, command: &str) -> Result<(), EnvironmentError> {
        let stream = self.inner.read().stream.clone();
        let Some(stream) = stream else {
            return Err(EnvironmentError::NotAttached);
        };

        let mut line = Vec::with_capacity(command.len() + 1);
        line.extend_from_slice(command.as_bytes());
        line.push(b'\n');

        stream
            .write(&line)
            .await
            .map_err(|e| EnvironmentError::Stream {
                error: e.to_string(),
            })
    }

    // ---- Log callback ----

    /// Registers the output callback; `None` removes it. The previous callback is dropped.
    pub fn set_log_callback(&self, callback: Option<LogCallback>) {
        let prev = std::mem::replace(&mut *self.log_callback.lock(), callback);
        drop(prev);
    }

    /// Delivers an output chunk to the registered callback.
    ///
    /// The callback runs after the slot lock is released, so it may replace or
    /// remove itself. Returns `false` if no callback is registered.
    pub fn emit_log(&self, chunk: &[u8]) -> bool {
        let callback = self.log_callback.lock().clone();
        match callback {
            Some(cb) => {
                cb(chunk);
                true
            }
            None => false,
        }
    }
}
