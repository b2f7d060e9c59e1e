//! # Console stream and log callback.
//!
//! A [`ConsoleStream`] is the bidirectional I/O channel to a running workload.
//! The environment only remembers whether one is attached and hands out the
//! handle; opening, pumping and closing it belong to the caller.
//!
//! A [`LogCallback`] receives raw output chunks pumped out of the stream. It is
//! shared so `emit_log` can call it without holding the registration lock.

use std::io;
use std::sync::Arc;

use async_trait::async_trait;

/// Receiver of raw console output chunks.
pub type LogCallback = Arc<dyn Fn(&[u8]) + Send + Sync + 'static>;

/// Attached console of a workload.
#[async_trait]
pub trait ConsoleStream: Send + Sync + 'static {
    /// Writes raw bytes to the workload's stdin.
    async fn write(&self, data: &[u8]) -> io::Result<()>;
}
