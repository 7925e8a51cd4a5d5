//! Tokio-backed task spawner.

use appcheck_core::TaskSpawner;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Spawns background work onto a captured tokio runtime and tracks it.
#[derive(Debug)]
pub struct TokioTaskSpawner {
    runtime: Handle,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl TokioTaskSpawner {
    /// Spawner over `runtime`.
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            handles: Mutex::new(Vec::new()),
        }
    }

    /// Spawner for the runtime the caller is running on, if any.
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    /// Wait for every task spawned so far.
    pub async fn drain(&self) {
        let handles: Vec<_> = self.handles.lock().drain(..).collect();
        for handle in handles {
            if let Err(err) = handle.await {
                tracing::warn!(error = %err, "background task did not complete");
            }
        }
    }

    /// Abort every tracked task.
    pub fn shutdown(&self) {
        for handle in self.handles.lock().drain(..) {
            handle.abort();
        }
    }

    /// Number of tracked tasks; finished ones are pruned on the next spawn.
    pub fn pending(&self) -> usize {
        self.handles.lock().len()
    }
}

impl TaskSpawner for TokioTaskSpawner {
    fn spawn(&self, fut: BoxFuture<'static, ()>) {
        let handle = self.runtime.spawn(fut);
        let mut handles = self.handles.lock();
        handles.retain(|handle| !handle.is_finished());
        handles.push(handle);
    }
}

impl Drop for TokioTaskSpawner {
    fn drop(&mut self) {
        for handle in self.handles.lock().drain(..) {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn drain_waits_for_spawned_tasks() {
        let spawner = TokioTaskSpawner::try_current().unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let counter = counter.clone();
            spawner.spawn(Box::pin(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        }
        assert_eq!(spawner.pending(), 3);

        spawner.drain().await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert_eq!(spawner.pending(), 0);
    }

    #[tokio::test]
    async fn shutdown_aborts_pending_tasks() {
        let spawner = TokioTaskSpawner::try_current().unwrap();
        spawner.spawn(Box::pin(futures::future::pending::<()>()));

        spawner.shutdown();
        assert_eq!(spawner.pending(), 0);
    }

    #[tokio::test]
    async fn finished_tasks_are_pruned_on_spawn() {
        let spawner = TokioTaskSpawner::try_current().unwrap();
        let (done_tx, done_rx) = tokio::sync::oneshot::channel();
        spawner.spawn(Box::pin(async move {
            let _ = done_tx.send(());
        }));
        done_rx.await.unwrap();
        while spawner.handles.lock().iter().any(|handle| !handle.is_finished()) {
            tokio::task::yield_now().await;
        }

        spawner.spawn(Box::pin(futures::future::pending::<()>()));
        assert_eq!(spawner.pending(), 1);
    }

    #[test]
    fn no_runtime_means_no_spawner() {
        assert!(TokioTaskSpawner::try_current().is_none());
    }
}
