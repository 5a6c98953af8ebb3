//! Every thread compresses the whole image, starting together at a barrier.
//!
//! This does `threads` times the work of the other strategies and exists to measure contention.
//! Thread 0 writes the caller's output; every other thread writes its own scratch buffer.

use super::output::DisjointOutput;
use super::pool::WorkerPool;
use super::signal::WorkSignal;
use super::{CompressionJob, ExecutionJob};
use crate::error::CompressError;
use crate::timing::StopWatch;
use std::sync::Barrier;
use texcomp_common::allocate::allocate_zeroed_align_64;

pub(super) fn run(job: &CompressionJob<'_>, output: &mut [u8]) -> Result<f64, CompressError> {
    let threads = job.threads();
    let all_blocks = ExecutionJob::new(0, job.block_count());
    let bytes_per_block = job.bytes_per_block();
    let repetitions = job.repetitions();

    let mut scratch = Vec::with_capacity(threads.saturating_sub(1));
    for _ in 1..threads {
        scratch.push(allocate_zeroed_align_64(output.len())?);
    }
    let mut targets = Vec::with_capacity(threads);
    targets.push(DisjointOutput::new(output));
    for buffer in scratch.iter_mut() {
        targets.push(DisjointOutput::new(buffer.as_mut_slice()));
    }

    let barrier = Barrier::new(threads);
    let signal = WorkSignal::new();
    let work = |worker: usize| {
        barrier.wait();
        // SAFETY: Each worker owns the target at its own index.
        let out = unsafe { targets[worker].block_range_mut(0, all_blocks.block_count, bytes_per_block) };
        for _ in 0..repetitions {
            job.encode_blocks(all_blocks, out, false);
        }
    };
    let (signal, work) = (&signal, &work);

    std::thread::scope(|scope| {
        let mut pool = WorkerPool::new(scope, signal, work, "texcomp-atomic");
        pool.spawn(threads)?;

        let mut stopwatch = StopWatch::new();
        stopwatch.start();
        pool.run_round();
        stopwatch.stop();
        pool.shut_down();
        Ok(stopwatch.time_in_milliseconds() / repetitions as f64)
    })
}
