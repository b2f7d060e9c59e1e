//! # In-memory backend.
//!
//! [`MemoryBackend`] keeps [`PodSnapshot`]s in a map keyed by
//! `(namespace, name)`. It can inject a failure for every lookup and delay
//! responses, which makes it usable as a stub in tests and as a stand-in
//! backend when embedding the controller.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;

use super::{accessor::Backend, record::PodSnapshot};
use crate::error::BackendError;

/// Map-backed [`Backend`].
#[derive(Debug, Default)]
pub struct MemoryBackend {
    pods: RwLock<HashMap<(String, String), PodSnapshot>>,
    failure: RwLock<Option<BackendError>>,
    delay: RwLock<Option<Duration>>,
    calls: AtomicUsize,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the snapshot stored under `(namespace, pod.name)`.
    pub fn insert(&self, namespace: &str, pod: PodSnapshot) {
        self.pods
            .write()
            .insert((namespace.to_string(), pod.name.clone()), pod);
    }

    /// Removes a workload; subsequent lookups report `NotFound`.
    pub fn remove(&self, namespace: &str, name: &str) -> Option<PodSnapshot> {
        self.pods
            .write()
            .remove(&(namespace.to_string(), name.to_string()))
    }

    /// Makes every lookup fail with `err` until [`clear_failure`](Self::clear_failure).
    pub fn fail_with(&self, err: BackendError) {
        *self.failure.write() = Some(err);
    }

    /// Stops injecting failures.
    pub fn clear_failure(&self) {
        *self.failure.write() = None;
    }

    /// Delays every lookup by `delay` (cancellable through the lookup token).
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.write() = delay;
    }

    /// Number of lookups served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn get(
        &self,
        namespace: &str,
        id: &str,
        ctx: &CancellationToken,
    ) -> Result<PodSnapshot, BackendError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let delay = *self.delay.read();
        if let Some(d) = delay {
            tokio::select! {
                _ = ctx.cancelled() => return Err(BackendError::Canceled),
                _ = tokio::time::sleep(d) => {}
            }
        }
        if ctx.is_cancelled() {
            return Err(BackendError::Canceled);
        }

        if let Some(err) = self.failure.read().clone() {
            return Err(err);
        }

        self.pods
            .read()
            .get(&(namespace.to_string(), id.to_string()))
            .cloned()
            .ok_or_else(|| BackendError::NotFound { id: id.to_string() })
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Phase;

    #[tokio::test]
    async fn test_lookup_is_scoped_by_namespace() {
        let backend = MemoryBackend::new();
        backend.insert("games", PodSnapshot::new("srv", Phase::Running));
        let ctx = CancellationToken::new();

        assert!(backend.get("games", "srv", &ctx).await.is_ok());
        let err = backend.get("default", "srv", &ctx).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn test_injected_failure_wins_over_data() {
        let backend = MemoryBackend::new();
        backend.insert("ns", PodSnapshot::new("srv", Phase::Running));
        backend.fail_with(BackendError::Api {
            status: 503,
            message: "unavailable".into(),
        });
        let ctx = CancellationToken::new();

        assert_eq!(
            backend.get("ns", "srv", &ctx).await.unwrap_err().as_label(),
            "backend_api"
        );

        backend.clear_failure();
        assert!(backend.get("ns", "srv", &ctx).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_observes_cancellation() {
        let backend = MemoryBackend::new();
        backend.set_delay(Some(Duration::from_secs(60)));
        let ctx = CancellationToken::new();
        ctx.cancel();

        let err = backend.get("ns", "srv", &ctx).await.unwrap_err();
        assert_eq!(err, BackendError::Canceled);
    }
}
