//! # Lock-free state cell.
//!
//! [`AtomicState`] stores a [`ProcessState`] in a single `AtomicU8`.
//! Loads and stores are `SeqCst`, so concurrent readers always observe either
//! the value before or after a concurrent store, and never block.

use std::sync::atomic::{AtomicU8, Ordering};

use super::ProcessState;

/// Result of storing a state into an [`AtomicState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// State held before the store.
    pub from: ProcessState,
    /// State held after the store.
    pub to: ProcessState,
    /// `true` if `from != to`.
    pub changed: bool,
}

/// Concurrency-safe holder of the current [`ProcessState`].
#[derive(Debug)]
pub struct AtomicState {
    raw: AtomicU8,
}

impl AtomicState {
    /// Creates a cell holding `initial`.
    pub fn new(initial: ProcessState) -> Self {
        Self {
            raw: AtomicU8::new(initial.as_u8()),
        }
    }

    /// Returns the current state.
    #[inline]
    pub fn load(&self) -> ProcessState {
        ProcessState::from_u8(self.raw.load(Ordering::SeqCst))
    }

    /// Overwrites the current state.
    #[inline]
    pub fn store(&self, state: ProcessState) {
        self.raw.store(state.as_u8(), Ordering::SeqCst);
    }

    /// Stores `next` and reports what it replaced.
    ///
    /// The swap is a single atomic step: when several callers race to the same
    /// new value, exactly one of them sees `changed == true`.
    pub fn transition(&self, next: ProcessState) -> Transition {
        let from = ProcessState::from_u8(self.raw.swap(next.as_u8(), Ordering::SeqCst));
        Transition {
            from,
            to: next,
            changed: from != next,
        }
    }
}

impl Default for AtomicState {
    fn default() -> Self {
        Self::new(ProcessState::Offline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_store_then_load() {
        let cell = AtomicState::default();
        for st in ProcessState::ALL {
            cell.store(st);
            assert_eq!(cell.load(), st);
        }
    }

    #[test]
    fn test_transition_reports_change() {
        let cell = AtomicState::new(ProcessState::Offline);

        let t = cell.transition(ProcessState::Starting);
        assert_eq!(t.from, ProcessState::Offline);
        assert_eq!(t.to, ProcessState::Starting);
        assert!(t.changed);

        let t = cell.transition(ProcessState::Starting);
        assert!(!t.changed);
        assert_eq!(cell.load(), ProcessState::Starting);
    }

    #[test]
    fn test_racing_transitions_report_one_change() {
        let cell = Arc::new(AtomicState::new(ProcessState::Offline));
        let changed = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let cell = Arc::clone(&cell);
                let changed = Arc::clone(&changed);
                std::thread::spawn(move || {
                    if cell.transition(ProcessState::Running).changed {
                        changed.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(changed.load(Ordering::SeqCst), 1);
        assert_eq!(cell.load(), ProcessState::Running);
    }
}
