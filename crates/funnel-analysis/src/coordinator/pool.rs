//! Bounded worker pool with a per-task time budget.
//!
//! Tasks share nothing mutable: each receives its own [`Cancellation`] whose
//! deadline starts when a worker picks the task up. Tasks that overrun are
//! reported as timed out and their worker is detached and replaced, so one
//! stuck task never holds back the rest of the queue. A detached worker is
//! retired: once its task returns it exits without taking another job, so
//! at most `workers` tasks are ever inside their budget at once.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{self as channel, Receiver, RecvTimeoutError, Sender};

use funnel_core::FxHashMap;

use crate::cancellation::Cancellation;

/// What came back from one task.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome<T> {
    Finished(T),
    TimedOut,
    Panicked,
}

type Job<F> = (usize, F);

enum Event<T> {
    /// Task index, worker id, start time.
    Started(usize, usize, Instant),
    Finished(usize, thread::Result<T>),
}

pub struct WorkerPool {
    workers: usize,
    timeout: Duration,
}

impl WorkerPool {
    pub fn new(workers: usize, timeout: Duration) -> Self {
        Self {
            workers: workers.max(1),
            timeout,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run every task to completion, panic, or timeout. Outcomes are returned
    /// in submission order.
    pub fn run<T, F>(&self, tasks: Vec<F>) -> Vec<TaskOutcome<T>>
    where
        T: Send + 'static,
        F: FnOnce(Cancellation) -> T + Send + 'static,
    {
        let total = tasks.len();
        if total == 0 {
            return Vec::new();
        }

        let (job_tx, job_rx) = channel::unbounded::<Job<F>>();
        let (event_tx, event_rx) = channel::unbounded::<Event<T>>();

        for job in tasks.into_iter().enumerate() {
            // The receiver is alive in this scope; send cannot fail.
            let _ = job_tx.send(job);
        }
        drop(job_tx);

        let mut retire_flags: FxHashMap<usize, Arc<AtomicBool>> = FxHashMap::default();
        let mut next_worker = 0;
        for _ in 0..self.workers.min(total) {
            let retired = Arc::new(AtomicBool::new(false));
            self.spawn_worker(next_worker, Arc::clone(&retired), job_rx.clone(), event_tx.clone());
            retire_flags.insert(next_worker, retired);
            next_worker += 1;
        }

        let mut outcomes: Vec<Option<TaskOutcome<T>>> = (0..total).map(|_| None).collect();
        // task index -> (worker id, start)
        let mut running: FxHashMap<usize, (usize, Instant)> = FxHashMap::default();
        let mut pending = total;

        while pending > 0 {
            let next_deadline = running
                .values()
                .map(|(_, started)| *started + self.timeout)
                .min();
            let event = match next_deadline {
                Some(deadline) => event_rx.recv_deadline(deadline),
                None => event_rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };

            match event {
                Ok(Event::Started(idx, worker, at)) => {
                    running.insert(idx, (worker, at));
                }
                Ok(Event::Finished(idx, result)) => {
                    running.remove(&idx);
                    if outcomes[idx].is_none() {
                        outcomes[idx] = Some(match result {
                            Ok(value) => TaskOutcome::Finished(value),
                            Err(_) => {
                                tracing::error!(task = idx, "worker task panicked");
                                TaskOutcome::Panicked
                            }
                        });
                        pending -= 1;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    let now = Instant::now();
                    let expired: Vec<(usize, usize)> = running
                        .iter()
                        .filter(|(_, (_, started))| now >= *started + self.timeout)
                        .map(|(idx, (worker, _))| (*idx, *worker))
                        .collect();
                    for (idx, worker) in expired {
                        running.remove(&idx);
                        if outcomes[idx].is_some() {
                            continue;
                        }
                        tracing::warn!(
                            task = idx,
                            worker,
                            timeout_secs = self.timeout.as_secs_f64(),
                            "task exceeded its budget; detaching worker"
                        );
                        outcomes[idx] = Some(TaskOutcome::TimedOut);
                        pending -= 1;
                        if let Some(retired) = retire_flags.remove(&worker) {
                            retired.store(true, Ordering::Release);
                        }
                        let retired = Arc::new(AtomicBool::new(false));
                        self.spawn_worker(
                            next_worker,
                            Arc::clone(&retired),
                            job_rx.clone(),
                            event_tx.clone(),
                        );
                        retire_flags.insert(next_worker, retired);
                        next_worker += 1;
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        outcomes
            .into_iter()
            .map(|o| o.unwrap_or(TaskOutcome::Panicked))
            .collect()
    }

    fn spawn_worker<T, F>(
        &self,
        id: usize,
        retired: Arc<AtomicBool>,
        jobs: Receiver<Job<F>>,
        events: Sender<Event<T>>,
    ) where
        T: Send + 'static,
        F: FnOnce(Cancellation) -> T + Send + 'static,
    {
        let timeout = self.timeout;
        let spawned = thread::Builder::new()
            .name(format!("funnel-worker-{id}"))
            .spawn(move || {
                while !retired.load(Ordering::Acquire) {
                    let Ok((idx, task)) = jobs.recv() else {
                        return;
                    };
                    let cancel = Cancellation::with_timeout(timeout);
                    if events.send(Event::Started(idx, id, Instant::now())).is_err() {
                        return;
                    }
                    let result = catch_unwind(AssertUnwindSafe(|| task(cancel)));
                    if events.send(Event::Finished(idx, result)).is_err() {
                        return;
                    }
                }
                tracing::debug!(worker = id, "retired worker exiting");
            });

        if let Err(e) = spawned {
            tracing::error!(worker = id, error = %e, "failed to spawn worker thread");
        }
    }
}
