//! # SubscriberSet: ordered delivery of environment events
//!
//! [`SubscriberSet`] hands each [`Event`] to every subscriber interested in the
//! emitting environment, one after another, in registration order.
//!
//! ```text
//! deliver(&Event{ environment: "srv-1", .. })
//!     ├─► sub A  (environment: None)     ─► on_event()
//!     ├─► sub B  (environment: "srv-2")  ─► skipped
//!     └─► sub C  (environment: "srv-1")  ─► on_event()
//! ```
//!
//! A subscriber that panics is logged with the environment and state it was
//! handling; later subscribers still get the event. A slow subscriber delays
//! the ones after it, so keep `on_event` short.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::error;

use super::Subscribe;
use crate::events::Event;

/// Subscribers fed by [`listen`](crate::listen).
#[derive(Default)]
pub struct SubscriberSet {
    subs: Vec<Arc<dyn Subscribe>>,
}

impl SubscriberSet {
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        Self { subs }
    }

    /// Delivers `event` to every subscriber whose environment filter matches.
    ///
    /// Returns the number of subscribers that handled it without panicking.
    pub async fn deliver(&self, event: &Event) -> usize {
        let mut handled = 0;
        for sub in self.subs.iter().filter(|s| accepts(s, event)) {
            match AssertUnwindSafe(sub.on_event(event)).catch_unwind().await {
                Ok(()) => handled += 1,
                Err(panic) => error!(
                    subscriber = sub.name(),
                    environment = %event.environment,
                    state = %event.state,
                    seq = event.seq,
                    panic = ?panic,
                    "subscriber panicked"
                ),
            }
        }
        handled
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subs.len()
    }
}

fn accepts(sub: &Arc<dyn Subscribe>, event: &Event) -> bool {
    sub.environment().is_none_or(|id| id == &*event.environment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    use crate::state::ProcessState;

    struct Watch {
        only: Option<&'static str>,
        seen: Mutex<Vec<(String, ProcessState)>>,
    }

    impl Watch {
        fn new(only: Option<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                only,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Subscribe for Watch {
        async fn on_event(&self, ev: &Event) {
            self.seen.lock().push((ev.environment.to_string(), ev.state));
        }

        fn environment(&self) -> Option<&str> {
            self.only
        }
    }

    struct Explode;

    #[async_trait]
    impl Subscribe for Explode {
        async fn on_event(&self, _ev: &Event) {
            panic!("subscriber failure");
        }
    }

    #[tokio::test]
    async fn test_environment_filter() {
        let all = Watch::new(None);
        let one = Watch::new(Some("srv-1"));
        let set = SubscriberSet::new(vec![
            all.clone() as Arc<dyn Subscribe>,
            one.clone() as Arc<dyn Subscribe>,
        ]);

        let first = Event::state_changed("srv-1", ProcessState::Starting);
        let second = Event::state_changed("srv-2", ProcessState::Running);
        assert_eq!(set.deliver(&first).await, 2);
        assert_eq!(set.deliver(&second).await, 1);

        assert_eq!(all.seen.lock().len(), 2);
        assert_eq!(
            *one.seen.lock(),
            vec![("srv-1".to_string(), ProcessState::Starting)]
        );
    }

    #[tokio::test]
    async fn test_panic_does_not_skip_later_subscribers() {
        let watch = Watch::new(None);
        let set = SubscriberSet::new(vec![
            Arc::new(Explode) as Arc<dyn Subscribe>,
            watch.clone() as Arc<dyn Subscribe>,
        ]);

        let handled = set
            .deliver(&Event::state_changed("srv-1", ProcessState::Offline))
            .await;

        assert_eq!(handled, 1);
        assert_eq!(watch.seen.lock().len(), 1);
    }

    #[test]
    fn test_empty_set() {
        let set = SubscriberSet::default();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }
}
