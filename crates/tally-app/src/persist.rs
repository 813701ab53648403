//! # Background Persistence
//!
//! The fire-and-forget-but-observable save pipeline.
//!
//! ## Why a Queue?
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │               Persistence Pipeline                          │
//! │                                                             │
//! │  UI thread (sync)              Worker task (async)          │
//! │  ───────────────               ───────────────────          │
//! │  increment() ──► enqueue ┐                                  │
//! │  increment() ──► enqueue ┼──► mpsc ──► save, save, save     │
//! │  toggle()    ──► enqueue ┘            (strictly in order)   │
//! │                                                             │
//! │  One worker drains the queue, so an older snapshot can      │
//! │  never land after a newer one even though saves complete    │
//! │  after the next render has already happened.                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each enqueued save hands back a [`PersistTask`]: a UI ignores it
//! (fire-and-forget), tests `.wait()` on it to assert persistence
//! actually occurred.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use tally_core::AppState;
use tally_db::StateRepository;

// =============================================================================
// Persist Task
// =============================================================================

/// Terminal result of one persistence attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    /// The state reached durable storage.
    Saved,
    /// The save failed; the session continues memory-only (degraded).
    Failed,
    /// Nothing was enqueued: the mutation was a no-op, or the controller
    /// runs without a store.
    Skipped,
}

/// Handle to one background save.
///
/// Dropping it is fine (fire-and-forget); awaiting [`PersistTask::wait`]
/// observes the outcome.
#[derive(Debug)]
pub struct PersistTask {
    rx: Option<oneshot::Receiver<PersistOutcome>>,
}

impl PersistTask {
    /// A task that never ran (no-op mutation or memory-only mode).
    pub(crate) fn skipped() -> Self {
        PersistTask { rx: None }
    }

    pub(crate) fn running(rx: oneshot::Receiver<PersistOutcome>) -> Self {
        PersistTask { rx: Some(rx) }
    }

    /// True when no save was enqueued for this mutation.
    pub fn is_skipped(&self) -> bool {
        self.rx.is_none()
    }

    /// Waits for the save to finish and returns its outcome.
    pub async fn wait(self) -> PersistOutcome {
        match self.rx {
            None => PersistOutcome::Skipped,
            // A dropped sender means the worker died mid-save.
            Some(rx) => rx.await.unwrap_or(PersistOutcome::Failed),
        }
    }
}

// =============================================================================
// Persist Queue
// =============================================================================

/// One queued save: a full-state snapshot plus its ack channel.
struct Job {
    state: AppState,
    ack: oneshot::Sender<PersistOutcome>,
}

/// Serializes all saves through a single worker task.
///
/// The worker owns the repository handle; when the queue (and with it the
/// controller) is dropped, the channel closes and the worker drains what
/// is left, then exits.
#[derive(Debug)]
pub(crate) struct PersistQueue {
    tx: mpsc::UnboundedSender<Job>,
    degraded: Arc<AtomicBool>,
}

impl PersistQueue {
    /// Spawns the worker on the current tokio runtime.
    pub(crate) fn spawn(repo: StateRepository) -> Self {
        let degraded = Arc::new(AtomicBool::new(false));
        let worker_degraded = Arc::clone(&degraded);
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();

        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                let outcome = match repo.save(&job.state).await {
                    Ok(()) => {
                        debug!("Background save completed");
                        PersistOutcome::Saved
                    }
                    Err(e) => {
                        warn!(
                            error = %e,
                            "State save failed; counters continue in memory only \
                             and may not survive a restart"
                        );
                        worker_degraded.store(true, Ordering::Relaxed);
                        PersistOutcome::Failed
                    }
                };

                // The caller may have dropped its PersistTask already.
                let _ = job.ack.send(outcome);
            }
        });

        PersistQueue { tx, degraded }
    }

    /// Enqueues a full-state snapshot for saving.
    pub(crate) fn enqueue(&self, state: AppState) -> PersistTask {
        let (ack, rx) = oneshot::channel();

        if self.tx.send(Job { state, ack }).is_err() {
            // Worker gone; treat like any other persistence failure.
            self.degraded.store(true, Ordering::Relaxed);
            return PersistTask::skipped();
        }

        PersistTask::running(rx)
    }

    /// Whether any save has failed since startup.
    pub(crate) fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tally_db::{Database, DbConfig};

    #[tokio::test]
    async fn test_enqueued_save_is_observable() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let queue = PersistQueue::spawn(db.state());

        let mut state = AppState::default();
        state.active_shop = "north".to_string();

        let task = queue.enqueue(state.clone());
        assert!(!task.is_skipped());
        assert_eq!(task.wait().await, PersistOutcome::Saved);
        assert!(!queue.is_degraded());

        assert_eq!(db.state().load().await.unwrap().unwrap(), state);
    }

    #[tokio::test]
    async fn test_saves_apply_in_enqueue_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let queue = PersistQueue::spawn(db.state());

        let mut last = AppState::default();
        let mut tasks = Vec::new();
        for n in 0..20 {
            let mut state = AppState::default();
            state.counters_mut("north").sold.insert("item".to_string(), n);
            last = state.clone();
            tasks.push(queue.enqueue(state));
        }
        for task in tasks {
            assert_eq!(task.wait().await, PersistOutcome::Saved);
        }

        assert_eq!(db.state().load().await.unwrap().unwrap(), last);
    }

    #[tokio::test]
    async fn test_failed_save_flips_degraded() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let queue = PersistQueue::spawn(db.state());
        db.close().await;

        let task = queue.enqueue(AppState::default());
        assert_eq!(task.wait().await, PersistOutcome::Failed);
        assert!(queue.is_degraded());
    }

    #[tokio::test]
    async fn test_skipped_task_resolves_immediately() {
        let task = PersistTask::skipped();
        assert!(task.is_skipped());
        assert_eq!(task.wait().await, PersistOutcome::Skipped);
    }
}
