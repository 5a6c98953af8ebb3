//! Persistent scoped worker threads, woken once per round by a [`WorkSignal`].

use super::signal::{FinishGuard, WorkSignal};
use crate::error::CompressError;
use std::thread::{Builder, Scope, ScopedJoinHandle};
use tracing::debug;

/// A set of worker threads living inside a [`std::thread::scope`].
///
/// Every round, each worker calls the shared `work` function once with its own index.
/// Workers are shut down and joined by [`WorkerPool::shut_down`], or by the enclosing scope if
/// the pool is dropped first.
pub(crate) struct WorkerPool<'scope, 'env: 'scope, F>
where
    F: Fn(usize) + Sync,
{
    scope: &'scope Scope<'scope, 'env>,
    signal: &'env WorkSignal,
    work: &'env F,
    name: &'static str,
    handles: Vec<ScopedJoinHandle<'scope, ()>>,
}

impl<'scope, 'env: 'scope, F> WorkerPool<'scope, 'env, F>
where
    F: Fn(usize) + Sync,
{
    pub(crate) fn new(
        scope: &'scope Scope<'scope, 'env>,
        signal: &'env WorkSignal,
        work: &'env F,
        name: &'static str,
    ) -> Self {
        Self {
            scope,
            signal,
            work,
            name,
            handles: Vec::new(),
        }
    }

    /// Number of running workers.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.handles.len()
    }

    /// Spawns workers until `count` are running. Already running workers are kept.
    ///
    /// On failure every worker, including the ones already running, is shut down.
    pub(crate) fn spawn(&mut self, count: usize) -> Result<(), CompressError> {
        for index in self.handles.len()..count {
            let signal = self.signal;
            let work = self.work;
            let spawned = Builder::new()
                .name(format!("{}-{index}", self.name))
                .spawn_scoped(self.scope, move || worker_loop(signal, index, work));

            match spawned {
                Ok(handle) => self.handles.push(handle),
                Err(err) => {
                    self.shut_down();
                    return Err(CompressError::ThreadSpawn(err));
                }
            }
        }
        debug!(workers = self.handles.len(), pool = self.name, "workers ready");
        Ok(())
    }

    /// Wakes every worker for a new round.
    pub(crate) fn start_round(&self) {
        self.signal.start(self.handles.len());
    }

    /// Waits until every worker finished the current round.
    ///
    /// Re-raises the panic of a worker that panicked during the round.
    pub(crate) fn wait_round(&mut self) {
        self.signal.wait_idle();
        if self.signal.is_poisoned() {
            self.shut_down();
        }
    }

    /// Runs one round to completion.
    pub(crate) fn run_round(&mut self) {
        self.start_round();
        self.wait_round();
    }

    /// Stops and joins every worker.
    pub(crate) fn shut_down(&mut self) {
        self.signal.shutdown();
        for handle in self.handles.drain(..) {
            if let Err(payload) = handle.join() {
                std::panic::resume_unwind(payload);
            }
        }
    }
}

impl<F> Drop for WorkerPool<'_, '_, F>
where
    F: Fn(usize) + Sync,
{
    fn drop(&mut self) {
        // The enclosing scope joins whatever is left.
        self.signal.shutdown();
    }
}

fn worker_loop<F>(signal: &WorkSignal, index: usize, work: &F)
where
    F: Fn(usize) + Sync,
{
    let mut seen = 0;
    while signal.wait_for_work(&mut seen) {
        let _guard = FinishGuard(signal);
        work(index);
    }
}
