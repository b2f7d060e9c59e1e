//! # Backend status accessor trait.
//!
//! Provides [`Backend`], the only surface the environment uses to query the
//! orchestration system. Implementations wrap a real cluster client; the
//! crate ships [`MemoryBackend`](crate::MemoryBackend) for tests and embedding.
//!
//! ## Rules
//! - A missing workload is reported as [`BackendError::NotFound`].
//! - Implementations should observe `ctx` and return [`BackendError::Canceled`]
//!   once it fires.
//! - Retries/backoff, if any, are the implementation's business.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use tokio_util::sync::CancellationToken;
//! use podvisor::{Backend, BackendError, Phase, PodSnapshot};
//!
//! struct AlwaysRunning;
//!
//! #[async_trait]
//! impl Backend for AlwaysRunning {
//!     async fn get(
//!         &self,
//!         _namespace: &str,
//!         id: &str,
//!         _ctx: &CancellationToken,
//!     ) -> Result<PodSnapshot, BackendError> {
//!         Ok(PodSnapshot::new(id, Phase::Running))
//!     }
//! }
//! ```

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::record::PodSnapshot;
use crate::error::BackendError;

/// Query surface of the orchestration backend.
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    /// Looks up the workload `id` inside `namespace`.
    async fn get(
        &self,
        namespace: &str,
        id: &str,
        ctx: &CancellationToken,
    ) -> Result<PodSnapshot, BackendError>;

    /// Returns the backend name used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
