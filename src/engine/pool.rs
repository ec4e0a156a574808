// Copyright © 2024 Pathway

use log::{error, info, warn};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{bounded, Receiver};

use super::error::{Error, Result};
use super::interval::{DateLayout, Interval};
use super::reconcile::find_real_activation;
use super::result_set::ResultSet;
use super::Key;

/// Source of the working sets processed by the pool.
pub trait LoadWorkingSet: Sync {
    fn load(&self, key: &str) -> Result<Vec<Interval>>;
}

#[derive(Debug, thiserror::Error)]
pub enum SkipReason {
    #[error("failed to load the working set: {0}")]
    Load(#[source] Error),

    #[error("reconciliation panicked: {0}")]
    Panicked(String),
}

#[derive(Debug)]
pub enum KeyOutcome {
    Reconciled(String),
    Skipped(SkipReason),
}

/// What happened to the keys passed to [`WorkerPool::run`].
///
/// Every key is counted exactly once: it is either processed, skipped
/// with a reason, or not scheduled because the run was cancelled.
#[derive(Debug, Default)]
pub struct PoolReport {
    pub processed: usize,
    pub skipped: Vec<(Key, SkipReason)>,
    pub not_scheduled: usize,
}

impl PoolReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    fn absorb(&mut self, stats: WorkerStats) {
        self.processed += stats.processed;
        self.skipped.extend(stats.skipped);
        self.not_scheduled += stats.abandoned;
    }
}

#[derive(Debug, Default)]
struct WorkerStats {
    processed: usize,
    skipped: Vec<(Key, SkipReason)>,
    abandoned: usize,
}

#[derive(Debug, Clone, Default)]
pub struct CancellationHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancellationHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// A fixed number of worker threads reconciling working sets.
///
/// Keys are handed to the workers one by one through a rendezvous channel,
/// so the submitting thread blocks while all workers are busy.
#[derive(Debug)]
pub struct WorkerPool {
    workers: usize,
    cancellation: CancellationHandle,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::NoWorkers);
        }
        Ok(Self {
            workers,
            cancellation: CancellationHandle::default(),
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Handle that stops the pool: no new keys are scheduled and the
    /// workers exit once they finish the key at hand.
    ///
    /// Cancellation is permanent. Every later [`WorkerPool::run`] on this pool
    /// schedules nothing and reports all of its keys as `not_scheduled`.
    pub fn cancellation_handle(&self) -> CancellationHandle {
        self.cancellation.clone()
    }

    /// Reconciles the working set of every key in `keys` and stores the
    /// results into `results`.
    ///
    /// A key whose working set can't be loaded, or whose reconciliation
    /// panics, is left out of `results` and reported in
    /// [`PoolReport::skipped`]; the other keys are processed as usual.
    /// Returns once every key has been handled or the pool was cancelled.
    pub fn run<L>(
        &self,
        keys: &[Key],
        loader: &L,
        layout: &DateLayout,
        results: &ResultSet,
    ) -> Result<PoolReport>
    where
        L: LoadWorkingSet + ?Sized,
    {
        let (task_sender, task_receiver) = bounded::<Key>(0);

        thread::scope(|scope| {
            let spawned: std::io::Result<Vec<_>> = (0..self.workers)
                .map(|worker_id| {
                    let task_receiver = task_receiver.clone();
                    let cancellation = self.cancellation.clone();
                    thread::Builder::new()
                        .name(format!("activation:worker-{worker_id}"))
                        .spawn_scoped(scope, move || {
                            run_worker(&task_receiver, loader, layout, results, &cancellation)
                        })
                })
                .collect();
            drop(task_receiver);

            let handles = match spawned {
                Ok(handles) => handles,
                Err(e) => {
                    error!("Failed to start worker threads: {e}");
                    // Disconnects the workers that did start, so the scope can join them.
                    drop(task_sender);
                    return Err(Error::Io(e));
                }
            };

            let mut report = PoolReport::default();
            for (position, key) in keys.iter().enumerate() {
                if self.cancellation.is_cancelled() {
                    info!("Worker pool cancelled, {} keys left unscheduled", keys.len() - position);
                    report.not_scheduled += keys.len() - position;
                    break;
                }
                if task_sender.send(key.clone()).is_err() {
                    error!("All workers are gone, {} keys left unscheduled", keys.len() - position);
                    report.not_scheduled += keys.len() - position;
                    break;
                }
            }
            drop(task_sender);

            for handle in handles {
                match handle.join() {
                    Ok(stats) => report.absorb(stats),
                    Err(payload) => error!("Worker thread panicked: {}", panic_message(&*payload)),
                }
            }
            Ok(report)
        })
    }
}

/// Loads and reconciles one working set.
pub fn process_key<L>(key: &str, loader: &L, layout: &DateLayout) -> KeyOutcome
where
    L: LoadWorkingSet + ?Sized,
{
    let outcome = catch_unwind(AssertUnwindSafe(|| -> Result<String> {
        let intervals = loader.load(key)?;
        Ok(find_real_activation(intervals, layout))
    }));
    match outcome {
        Ok(Ok(real_activation_date)) => KeyOutcome::Reconciled(real_activation_date),
        Ok(Err(e)) => KeyOutcome::Skipped(SkipReason::Load(e)),
        Err(payload) => KeyOutcome::Skipped(SkipReason::Panicked(panic_message(&*payload))),
    }
}

fn run_worker<L>(
    tasks: &Receiver<Key>,
    loader: &L,
    layout: &DateLayout,
    results: &ResultSet,
    cancellation: &CancellationHandle,
) -> WorkerStats
where
    L: LoadWorkingSet + ?Sized,
{
    let mut stats = WorkerStats::default();
    for key in tasks {
        // Keep draining after cancellation so that the submitter never blocks.
        if cancellation.is_cancelled() {
            stats.abandoned += 1;
            continue;
        }
        match process_key(&key, loader, layout) {
            KeyOutcome::Reconciled(real_activation_date) => {
                if !results.insert(key.clone(), real_activation_date) {
                    warn!("Key {key:?} was scheduled more than once, keeping the first result");
                }
                stats.processed += 1;
            }
            KeyOutcome::Skipped(reason) => {
                warn!("Skipping key {key:?}: {reason}");
                stats.skipped.push((key, reason));
            }
        }
    }
    stats
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
