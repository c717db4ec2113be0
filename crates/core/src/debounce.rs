//! Trailing-edge debouncer: a coalescing scheduler that waits for input to go quiet
//! for a fixed interval before running the most recently scheduled task.
//!
//! Every [`Debouncer::schedule`] call aborts the pending timer and arms a new one.
//! Once a timer fires, its task is spawned detached, so later calls never cancel work
//! that has already started (an in-flight search request runs to completion).
//!
//! The debouncer also counts its outstanding work: the armed timer plus every fired
//! task still running. [`Debouncer::idle`] resolves once that count reaches zero.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
    pending: Mutex<Option<JoinHandle<()>>>,
    outstanding: Arc<watch::Sender<usize>>,
}

/// One unit of outstanding work. Travels from the timer into the fired task and is
/// released when whichever of them owns it is dropped (finished, replaced or aborted).
struct WorkGuard(Arc<watch::Sender<usize>>);

impl WorkGuard {
    fn acquire(outstanding: &Arc<watch::Sender<usize>>) -> Self {
        outstanding.send_modify(|n| *n += 1);
        Self(Arc::clone(outstanding))
    }
}

impl Drop for WorkGuard {
    fn drop(&mut self) {
        self.0.send_modify(|n| *n -= 1);
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        let (outstanding, _) = watch::channel(0);
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
            outstanding: Arc::new(outstanding),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm the timer for `task`, replacing whatever was scheduled before.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        // Generation bump and handle swap happen under one lock, so concurrent callers
        // agree on which timer is the latest
        let mut pending = self.lock_pending();
        let gen = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let delay = self.delay;
        let work = WorkGuard::acquire(&self.outstanding);

        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // A timer that woke just as it was replaced must not fire
            if generation.load(Ordering::SeqCst) == gen {
                tokio::spawn(async move {
                    task.await;
                    drop(work);
                });
            }
        });

        if let Some(previous) = pending.replace(timer) {
            previous.abort();
        }
    }

    /// Disarm the pending timer, if any. Tasks that already fired are unaffected.
    pub fn cancel(&self) {
        let mut pending = self.lock_pending();
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(timer) = pending.take() {
            timer.abort();
        }
    }

    /// Armed timer plus fired tasks that have not finished.
    pub fn outstanding(&self) -> usize {
        *self.outstanding.borrow()
    }

    /// Resolve once no timer is armed and every fired task has finished.
    pub async fn idle(&self) {
        let mut rx = self.outstanding.subscribe();
        // The sender lives as long as `self`, so the channel cannot close here
        let _ = rx.wait_for(|n| *n == 0).await;
    }

    /// Whether a timer is armed and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.lock_pending().as_ref().is_some_and(|t| !t.is_finished())
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        // The guarded value is a plain handle; a poisoned lock still holds a usable one
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
