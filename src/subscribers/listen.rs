//! # Bus listener.
//!
//! Bridges a [`Bus`] to a [`SubscriberSet`]:
//!
//! ```text
//! Bus ──► broadcast::Receiver ──► listen loop ──► SubscriberSet::deliver(&Event)
//! ```
//!
//! The receiver is created before the task is spawned, so events published
//! after `listen` returns are never missed. Lagging drops the oldest events
//! and logs how many; the loop ends on cancellation or when every sender is
//! gone. Events are delivered one at a time, so a slow subscriber lets the
//! receiver fall behind.

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::SubscriberSet;
use crate::events::Bus;

/// Spawns a task forwarding every bus event to `set` until `token` is cancelled.
pub fn listen(bus: &Bus, set: SubscriberSet, token: CancellationToken) -> JoinHandle<()> {
    let mut rx = bus.subscribe();

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                res = rx.recv() => match res {
                    Ok(ev) => {
                        set.deliver(&ev).await;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "event listener lagged");
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use tokio::sync::Notify;

    use crate::events::{Event, Publish};
    use crate::state::ProcessState;
    use crate::subscribers::Subscribe;

    #[derive(Default)]
    struct Collect {
        seen: Mutex<Vec<ProcessState>>,
        notify: Notify,
    }

    #[async_trait]
    impl Subscribe for Collect {
        async fn on_event(&self, ev: &Event) {
            self.seen.lock().push(ev.state);
            self.notify.notify_one();
        }

        fn name(&self) -> &'static str {
            "collect"
        }
    }

    struct Explode;

    #[async_trait]
    impl Subscribe for Explode {
        async fn on_event(&self, _ev: &Event) {
            panic!("subscriber failure");
        }

        fn name(&self) -> &'static str {
            "explode"
        }
    }

    async fn wait_for(c: &Collect, n: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while c.seen.lock().len() < n {
                c.notify.notified().await;
            }
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_events_reach_subscribers_in_order() {
        let bus = Bus::new(16);
        let collect = Arc::new(Collect::default());
        let set = SubscriberSet::new(vec![collect.clone() as Arc<dyn Subscribe>]);
        let token = CancellationToken::new();
        let handle = listen(&bus, set, token.clone());

        bus.publish(Event::state_changed("srv", ProcessState::Starting));
        bus.publish(Event::state_changed("srv", ProcessState::Running));
        wait_for(&collect, 2).await;

        assert_eq!(
            *collect.seen.lock(),
            vec![ProcessState::Starting, ProcessState::Running]
        );

        token.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_panicking_subscriber_is_isolated() {
        let bus = Bus::new(16);
        let collect = Arc::new(Collect::default());
        let set = SubscriberSet::new(vec![
            Arc::new(Explode) as Arc<dyn Subscribe>,
            collect.clone() as Arc<dyn Subscribe>,
        ]);
        assert_eq!(set.len(), 2);
        let token = CancellationToken::new();
        let handle = listen(&bus, set, token.clone());

        bus.publish(Event::state_changed("srv", ProcessState::Stopping));
        bus.publish(Event::state_changed("srv", ProcessState::Offline));
        wait_for(&collect, 2).await;

        token.cancel();
        handle.await.unwrap();
    }
}
