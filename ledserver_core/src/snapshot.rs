use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::sequence::MasterSequence;

/// What the config watcher publishes and the emit loop consumes: a
/// master sequence and its frame interval, always replaced together.
#[derive(Debug)]
pub struct Snapshot {
    pub sequence: MasterSequence,
    pub interval: Duration,
}

/// Swap-on-write cell shared between the watcher and the emit loop.
///
/// Readers clone the current `Arc<Snapshot>` once per tick and compare
/// pointers to detect a swap; the lock is held only for the pointer
/// clone or swap, never across I/O.
#[derive(Debug, Clone)]
pub struct SharedSnapshot {
    inner: Arc<Mutex<Arc<Snapshot>>>,
}

impl SharedSnapshot {
    pub fn new(initial: Snapshot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Arc::new(initial))),
        }
    }

    pub fn load(&self) -> Arc<Snapshot> {
        self.inner.lock().unwrap().clone()
    }

    pub fn store(&self, snapshot: Snapshot) {
        *self.inner.lock().unwrap() = Arc::new(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn snapshot(interval_ms: u64) -> Snapshot {
        Snapshot {
            sequence: MasterSequence::build(&[Color::BLACK], 0, 2),
            interval: Duration::from_millis(interval_ms),
        }
    }

    #[test]
    fn load_returns_the_same_arc_until_a_store() {
        let shared = SharedSnapshot::new(snapshot(10));

        let a = shared.load();
        let b = shared.load();
        assert!(Arc::ptr_eq(&a, &b));

        shared.store(snapshot(20));
        let c = shared.load();
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(c.interval, Duration::from_millis(20));
    }

    #[test]
    fn clones_observe_the_swap() {
        let shared = SharedSnapshot::new(snapshot(10));
        let reader = shared.clone();

        shared.store(snapshot(30));
        assert_eq!(reader.load().interval, Duration::from_millis(30));
    }
}
