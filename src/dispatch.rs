//! Bounded concurrent dispatch of per-package tasks.
//!
//! The dispatcher owns two channels: a pool of slot tokens that bounds how
//! many tasks run at once, and an outcome channel that doubles as the join
//! barrier. Admission takes one queued package and one token; the task sends
//! its outcome and returns its token when it finishes, success or failure.
//! The run ends only once one outcome per admitted package has been
//! collected and every thread is joined, so no task is silently dropped and
//! no package is double-processed.
//!
//! There is no timeout or cancellation: an external process that never
//! returns stalls its slot indefinitely. A per-task timeout cannot cleanly
//! cancel a blocked subprocess wait without orphaning the child, so the gap
//! is documented here instead of half-fixed.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use crate::error::{HistoryGraphError, Result};

/// The terminal state of one package's task.
#[derive(Debug)]
pub struct TaskOutcome {
    pub package: String,
    pub result: Result<()>,
}

impl TaskOutcome {
    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Fans package tasks out across OS threads under a fixed worker budget.
pub struct Dispatcher {
    workers: usize,
}

impl Dispatcher {
    /// Creates a dispatcher with the given concurrency bound (minimum 1).
    pub fn new(workers: usize) -> Self {
        Dispatcher {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Processes every package exactly once, never running more than the
    /// worker budget concurrently.
    ///
    /// Packages are admitted in order; completion order is not guaranteed.
    /// A task failure (or panic) releases its slot and the run continues.
    ///
    /// # Arguments
    /// * `packages` - FIFO work queue
    /// * `task` - The per-package body; runs on a worker thread
    ///
    /// # Returns
    /// One [TaskOutcome] per package, in completion order
    pub fn run<F>(&self, packages: Vec<String>, task: F) -> Vec<TaskOutcome>
    where
        F: Fn(&str) -> Result<()> + Send + Sync + 'static,
    {
        let task = Arc::new(task);
        let total = packages.len();

        let (slot_tx, slot_rx) = mpsc::channel();
        for _ in 0..self.workers {
            let _ = slot_tx.send(());
        }

        let (outcome_tx, outcome_rx) = mpsc::channel();
        let mut handles = Vec::with_capacity(total);

        for package in packages {
            // Blocks until a running task returns its token. Cannot fail
            // while this scope holds a sender.
            if slot_rx.recv().is_err() {
                break;
            }

            let task = Arc::clone(&task);
            let slot_tx = slot_tx.clone();
            let outcome_tx = outcome_tx.clone();

            handles.push(thread::spawn(move || {
                let result = match catch_unwind(AssertUnwindSafe(|| task(&package))) {
                    Ok(result) => result,
                    Err(_) => Err(HistoryGraphError::input(format!(
                        "task panicked for package {}",
                        package
                    ))),
                };
                // Outcome first, then the token: termination can never race
                // a slot return.
                let _ = outcome_tx.send(TaskOutcome { package, result });
                let _ = slot_tx.send(());
            }));
        }

        // Join barrier: the channel closes once every task (and this scope)
        // has dropped its sender, after one outcome per package.
        drop(outcome_tx);
        let outcomes: Vec<TaskOutcome> = outcome_rx.iter().collect();

        for handle in handles {
            let _ = handle.join();
        }

        outcomes
    }
}
