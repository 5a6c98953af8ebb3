//! One contiguous chunk of blocks per thread.

use super::output::DisjointOutput;
use super::pool::WorkerPool;
use super::signal::WorkSignal;
use super::{CompressionJob, ExecutionJob};
use crate::error::CompressError;
use crate::timing::StopWatch;
use parking_lot::Mutex;
use std::thread::Scope;

/// Splits `block_count` blocks into `threads` contiguous chunks of `ceil(blocks / threads)`.
///
/// The last chunks may be short or empty.
pub(super) fn partition_blocks(block_count: usize, threads: usize) -> Vec<ExecutionJob> {
    let threads = threads.max(1);
    let chunk = block_count.div_ceil(threads);
    (0..threads)
        .map(|thread| {
            let first_block = (thread * chunk).min(block_count);
            let count = chunk.min(block_count - first_block);
            ExecutionJob::new(first_block, count)
        })
        .collect()
}

/// Persistent workers, each compressing the chunk at its own index of `chunks`.
///
/// Lifecycle per call: [`ThreadGroup::prepare_threads`], [`ThreadGroup::start`],
/// [`ThreadGroup::join`], repeated per repetition, then [`ThreadGroup::clean_up_threads`].
pub(super) struct ThreadGroup<'scope, 'env: 'scope, F>
where
    F: Fn(usize) + Sync,
{
    pool: WorkerPool<'scope, 'env, F>,
    chunks: &'env Mutex<Vec<ExecutionJob>>,
    threads: usize,
    block_count: usize,
    stopwatch: StopWatch,
    cleaned_up: bool,
}

impl<'scope, 'env: 'scope, F> ThreadGroup<'scope, 'env, F>
where
    F: Fn(usize) + Sync,
{
    pub(super) fn new(
        scope: &'scope Scope<'scope, 'env>,
        signal: &'env WorkSignal,
        chunks: &'env Mutex<Vec<ExecutionJob>>,
        work: &'env F,
        threads: usize,
        block_count: usize,
    ) -> Self {
        Self {
            pool: WorkerPool::new(scope, signal, work, "texcomp-group"),
            chunks,
            threads,
            block_count,
            stopwatch: StopWatch::new(),
            cleaned_up: false,
        }
    }

    /// Partitions the blocks and spawns the workers if not yet running.
    ///
    /// Safe to call before every repetition.
    pub(super) fn prepare_threads(&mut self) -> Result<(), CompressError> {
        *self.chunks.lock() = partition_blocks(self.block_count, self.threads);
        self.pool.spawn(self.threads)
    }

    /// Wakes every worker and starts timing.
    pub(super) fn start(&mut self) {
        self.stopwatch.reset();
        self.stopwatch.start();
        self.pool.start_round();
    }

    /// Waits for every worker to finish its chunk and stops timing.
    pub(super) fn join(&mut self) {
        self.pool.wait_round();
        self.stopwatch.stop();
    }

    /// Time taken by the last `start` .. `join`.
    pub(super) fn stop_watch(&self) -> &StopWatch {
        &self.stopwatch
    }

    /// Number of running workers.
    #[cfg(test)]
    pub(super) fn worker_count(&self) -> usize {
        self.pool.len()
    }

    /// Shuts down and joins every worker. Later calls do nothing.
    pub(super) fn clean_up_threads(&mut self) {
        if !self.cleaned_up {
            self.pool.shut_down();
            self.cleaned_up = true;
        }
    }
}

pub(super) fn run(job: &CompressionJob<'_>, output: &mut [u8]) -> Result<f64, CompressError> {
    let output = DisjointOutput::new(output);
    let chunks: Mutex<Vec<ExecutionJob>> = Mutex::new(Vec::new());
    let signal = WorkSignal::new();
    let bytes_per_block = job.bytes_per_block();

    let work = |worker: usize| {
        let chunk: Option<ExecutionJob> = chunks.lock().get(worker).copied();
        if let Some(chunk) = chunk {
            // SAFETY: Chunks from `partition_blocks` never overlap.
            let out = unsafe {
                output.block_range_mut(chunk.first_block, chunk.block_count, bytes_per_block)
            };
            job.encode_blocks(chunk, out, true);
        }
    };
    let (signal, chunks_ref, work) = (&signal, &chunks, &work);

    std::thread::scope(|scope| {
        let mut group = ThreadGroup::new(
            scope,
            signal,
            chunks_ref,
            work,
            job.threads(),
            job.block_count(),
        );
        let result = compress_with_group(&mut group, job.repetitions());
        group.clean_up_threads();
        result
    })
}

fn compress_with_group<F>(
    group: &mut ThreadGroup<'_, '_, F>,
    repetitions: usize,
) -> Result<f64, CompressError>
where
    F: Fn(usize) + Sync,
{
    let mut total_ms = 0.0;
    for _ in 0..repetitions {
        group.prepare_threads()?;
        group.start();
        group.join();
        total_ms += group.stop_watch().time_in_milliseconds();
    }
    Ok(total_ms / repetitions as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;
    use core::sync::atomic::{AtomicUsize, Ordering};

    #[rstest]
    #[case(10, 3, &[(0, 4), (4, 4), (8, 2)])]
    #[case(8, 4, &[(0, 2), (2, 2), (4, 2), (6, 2)])]
    #[case(2, 4, &[(0, 1), (1, 1), (2, 0), (2, 0)])]
    #[case(0, 2, &[(0, 0), (0, 0)])]
    fn partition_covers_every_block(
        #[case] blocks: usize,
        #[case] threads: usize,
        #[case] expected: &[(usize, usize)],
    ) {
        let chunks: Vec<(usize, usize)> = partition_blocks(blocks, threads)
            .iter()
            .map(|job| (job.first_block, job.block_count))
            .collect();
        assert_eq!(chunks, expected);
    }

    #[test]
    fn repeated_prepare_run_cleanup_trials() {
        for _ in 0..5 {
            let signal = WorkSignal::new();
            let chunks: Mutex<Vec<ExecutionJob>> = Mutex::new(Vec::new());
            let covered = AtomicUsize::new(0);
            let work = |worker: usize| {
                if let Some(chunk) = chunks.lock().get(worker).copied() {
                    covered.fetch_add(chunk.block_count, Ordering::SeqCst);
                }
            };
            let (signal_ref, chunks_ref, work_ref) = (&signal, &chunks, &work);

            std::thread::scope(|scope| {
                let mut group = ThreadGroup::new(scope, signal_ref, chunks_ref, work_ref, 3, 10);
                for _ in 0..4 {
                    group.prepare_threads().unwrap();
                    assert_eq!(group.worker_count(), 3);
                    group.start();
                    group.join();
                }
                group.clean_up_threads();
                group.clean_up_threads();
                assert_eq!(group.worker_count(), 0);
            });
            assert_eq!(covered.load(Ordering::SeqCst), 40);
        }
    }
}
