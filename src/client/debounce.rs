//! Keyed debouncing of background syncs

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Runs a task once `delay` has passed without a newer task for the same key
///
/// Scheduling a key aborts the task still pending for it, so at most one
/// task per key is alive at a time.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Arc<Mutex<HashMap<String, JoinHandle<()>>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm (or re-arm) the timer for `key`
    pub fn schedule<F>(&self, key: &str, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.retain(|_, handle| !handle.is_finished());
        if let Some(previous) = pending.insert(key.to_string(), handle) {
            previous.abort();
            tracing::debug!(key, "debounced task re-armed");
        }
    }

    /// Drop the pending task for `key`, if any
    pub fn cancel(&self, key: &str) -> bool {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        match pending.remove(key) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Whether a task for `key` is waiting or running
    pub fn is_pending(&self, key: &str) -> bool {
        let pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.get(key).is_some_and(|handle| !handle.is_finished())
    }

    /// Whether any task is waiting or running
    pub fn has_pending(&self) -> bool {
        let pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.values().any(|handle| !handle.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_only_last_task_runs() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        let runs = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(AtomicUsize::new(0));

        for value in 1..=3 {
            let runs = runs.clone();
            let last = last.clone();
            debouncer.schedule("toggle:1", async move {
                runs.fetch_add(1, Ordering::SeqCst);
                last.store(value, Ordering::SeqCst);
            });
        }
        assert!(debouncer.is_pending("toggle:1"));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(last.load(Ordering::SeqCst), 3);
        assert!(!debouncer.has_pending());
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let debouncer = Debouncer::new(Duration::from_millis(20));
        let runs = Arc::new(AtomicUsize::new(0));

        for key in ["toggle:1", "toggle:2"] {
            let runs = runs.clone();
            debouncer.schedule(key, async move {
                runs.fetch_add(1, Ordering::SeqCst);
            });
        }

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_finished_tasks_are_pruned() {
        let debouncer = Debouncer::new(Duration::from_millis(10));
        for id in 1..=20 {
            debouncer.schedule(&format!("toggle:{}", id), async {});
        }
        tokio::time::sleep(Duration::from_millis(100)).await;

        debouncer.schedule("toggle:21", async {});
        assert_eq!(debouncer.pending.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cancel() {
        let debouncer = Debouncer::new(Duration::from_millis(20));
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();
        debouncer.schedule("reorder", async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(debouncer.cancel("reorder"));
        assert!(!debouncer.cancel("reorder"));
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }
}
