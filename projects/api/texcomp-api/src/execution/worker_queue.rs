//! Threads pull fixed size jobs off a shared FIFO until it runs dry.

use super::output::DisjointOutput;
use super::pool::WorkerPool;
use super::signal::WorkSignal;
use super::{CompressionJob, ExecutionJob};
use crate::error::CompressError;
use crate::timing::StopWatch;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Splits `block_count` blocks into jobs of `job_size` blocks; the last job may be short.
pub(super) fn split_jobs(block_count: usize, job_size: usize) -> Vec<ExecutionJob> {
    let job_size = job_size.max(1);
    (0..block_count)
        .step_by(job_size)
        .map(|first_block| ExecutionJob::new(first_block, job_size.min(block_count - first_block)))
        .collect()
}

pub(super) fn run(job: &CompressionJob<'_>, output: &mut [u8]) -> Result<f64, CompressError> {
    let output = DisjointOutput::new(output);
    let jobs = split_jobs(job.block_count(), job.job_size());
    let queue: Mutex<VecDeque<ExecutionJob>> = Mutex::new(VecDeque::with_capacity(jobs.len()));
    let signal = WorkSignal::new();
    let bytes_per_block = job.bytes_per_block();

    let work = |_worker: usize| loop {
        let next: Option<ExecutionJob> = queue.lock().pop_front();
        let Some(next) = next else {
            break;
        };
        // SAFETY: Jobs from `split_jobs` never overlap and each is popped exactly once.
        let out =
            unsafe { output.block_range_mut(next.first_block, next.block_count, bytes_per_block) };
        job.encode_blocks(next, out, true);
    };
    let (signal, queue_ref, work) = (&signal, &queue, &work);

    std::thread::scope(|scope| {
        let mut pool = WorkerPool::new(scope, signal, work, "texcomp-queue");
        pool.spawn(job.threads())?;

        let mut stopwatch = StopWatch::new();
        for _ in 0..job.repetitions() {
            queue_ref.lock().extend(jobs.iter().copied());
            stopwatch.start();
            pool.run_round();
            stopwatch.stop();
        }
        pool.shut_down();
        Ok(stopwatch.time_in_milliseconds() / job.repetitions() as f64)
    })
}
