//! Wakes a fixed set of persistent workers once per round of work.

use parking_lot::{Condvar, Mutex};

#[derive(Debug, Default)]
struct SignalState {
    generation: u64,
    active: usize,
    shutdown: bool,
    poisoned: bool,
}

/// Generation counter and condition variables shared by a pool of workers.
///
/// The owner calls [`WorkSignal::start`] to begin a round, then [`WorkSignal::wait_idle`].
/// Each worker calls [`WorkSignal::wait_for_work`], does its share, then
/// [`WorkSignal::finish_one`].
#[derive(Debug, Default)]
pub(crate) struct WorkSignal {
    state: Mutex<SignalState>,
    work_ready: Condvar,
    idle: Condvar,
}

impl WorkSignal {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Begins a new round for `workers` workers.
    pub(crate) fn start(&self, workers: usize) {
        let mut state = self.state.lock();
        state.generation += 1;
        state.active = workers;
        self.work_ready.notify_all();
    }

    /// Blocks until a round newer than `last_seen` starts, or the signal shuts down.
    ///
    /// Returns `false` on shutdown.
    pub(crate) fn wait_for_work(&self, last_seen: &mut u64) -> bool {
        let mut state = self.state.lock();
        loop {
            if state.shutdown {
                return false;
            }
            if state.generation != *last_seen {
                *last_seen = state.generation;
                return true;
            }
            self.work_ready.wait(&mut state);
        }
    }

    /// Marks one worker as done with the current round.
    pub(crate) fn finish_one(&self) {
        let mut state = self.state.lock();
        state.active = state.active.saturating_sub(1);
        if state.active == 0 {
            self.idle.notify_all();
        }
    }

    /// Blocks until every worker of the current round called [`WorkSignal::finish_one`].
    pub(crate) fn wait_idle(&self) {
        let mut state = self.state.lock();
        while state.active != 0 {
            self.idle.wait(&mut state);
        }
    }

    /// Returns `true` if a worker panicked during a round.
    pub(crate) fn is_poisoned(&self) -> bool {
        self.state.lock().poisoned
    }

    fn mark_poisoned(&self) {
        self.state.lock().poisoned = true;
    }

    /// Tells every worker to exit.
    pub(crate) fn shutdown(&self) {
        let mut state = self.state.lock();
        state.shutdown = true;
        self.work_ready.notify_all();
    }
}

/// Calls [`WorkSignal::finish_one`] when dropped, so a panicking worker still counts as done.
pub(crate) struct FinishGuard<'a>(pub(crate) &'a WorkSignal);

impl Drop for FinishGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.mark_poisoned();
        }
        self.0.finish_one();
    }
}
