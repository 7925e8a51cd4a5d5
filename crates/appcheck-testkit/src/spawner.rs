//! Deterministic task spawner for tests.

use appcheck_core::TaskSpawner;
use futures::future::BoxFuture;
use parking_lot::Mutex;

/// Holds spawned futures until the test runs them.
#[derive(Default)]
pub struct QueuedSpawner {
    queue: Mutex<Vec<BoxFuture<'static, ()>>>,
}

impl QueuedSpawner {
    /// Empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued futures
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// Run every queued future to completion on the current thread.
    pub fn run_pending(&self) -> usize {
        let queued: Vec<_> = self.queue.lock().drain(..).collect();
        let count = queued.len();
        for fut in queued {
            futures::executor::block_on(fut);
        }
        count
    }
}

impl TaskSpawner for QueuedSpawner {
    fn spawn(&self, fut: BoxFuture<'static, ()>) {
        self.queue.lock().push(fut);
    }
}
