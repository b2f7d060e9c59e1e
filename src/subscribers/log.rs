//! # LogWriter — event logger
//!
//! A minimal subscriber that records incoming [`Event`]s through `tracing`.
//!
//! ## Example output (fmt subscriber)
//! ```text
//! INFO podvisor::subscribers::log: state change environment=srv-1 state=starting seq=0
//! INFO podvisor::subscribers::log: state change environment=srv-1 state=running seq=1
//! ```

use async_trait::async_trait;
use tracing::info;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::StateChanged => {
                info!(
                    environment = %e.environment,
                    state = %e.state,
                    seq = e.seq,
                    "{}",
                    e.kind.topic()
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}

#[cfg(all(test, feature = "logging"))]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::state::ProcessState;
    use crate::subscribers::SubscriberSet;

    #[tokio::test]
    async fn test_state_change_is_handled() {
        let writer = LogWriter::new();
        assert_eq!(writer.name(), "LogWriter");
        writer
            .on_event(&Event::state_changed("srv-1", ProcessState::Running))
            .await;

        let set = SubscriberSet::new(vec![Arc::new(LogWriter) as Arc<dyn Subscribe>]);
        let ev = Event::state_changed("srv-1", ProcessState::Offline);
        assert_eq!(set.deliver(&ev).await, 1);
    }
}
