//! Strategies for running a block codec over a whole image.
//!
//! All strategies write identical bytes. They differ in how blocks are handed to threads:
//!
//! - [`ExecutionStrategy::Serial`]: every block on the calling thread.
//! - [`ExecutionStrategy::AtomicBarrier`]: every thread compresses the whole image after
//!   meeting at a barrier. Only useful as a benchmark.
//! - [`ExecutionStrategy::ThreadGroup`]: one contiguous, equally sized chunk per thread.
//! - [`ExecutionStrategy::WorkerQueue`]: threads pull fixed size jobs off a shared queue.

mod atomic_barrier;
mod output;
mod pool;
mod serial;
mod signal;
mod thread_group;
mod worker_queue;

use crate::dispatch::ResolvedCodec;
use crate::error::CompressError;
use crate::pixel_buffer::PixelBuffer;
use crate::settings::CompressionSettings;
use crate::stats::{BlockStatsRecord, StatsManager};
use core::fmt;
use derive_enum_all_values::AllValues;

/// A contiguous range of blocks handed to one worker.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ExecutionJob {
    /// Index of the first block, in raster order.
    pub first_block: usize,
    /// Number of blocks.
    pub block_count: usize,
}

impl ExecutionJob {
    /// Creates a job covering `block_count` blocks starting at `first_block`.
    pub const fn new(first_block: usize, block_count: usize) -> Self {
        Self {
            first_block,
            block_count,
        }
    }
}

/// Everything a strategy needs to compress one image: pixels, codec and thread settings.
pub struct CompressionJob<'a> {
    pixels: PixelBuffer<'a>,
    codec: ResolvedCodec,
    stats: Option<&'a dyn StatsManager>,
    threads: usize,
    job_size: usize,
    repetitions: usize,
}

impl<'a> CompressionJob<'a> {
    /// Prepares `pixels` for compression with `codec`, taking thread counts and the stats
    /// manager from `settings`.
    pub fn new(
        pixels: PixelBuffer<'a>,
        codec: ResolvedCodec,
        settings: &'a CompressionSettings,
    ) -> Self {
        let stats = match settings.stats_manager() {
            Some(stats) if codec.collect_stats => Some(stats.as_ref()),
            _ => None,
        };
        Self {
            pixels,
            codec,
            stats,
            threads: settings.threads(),
            job_size: settings.job_size(),
            repetitions: settings.repetitions(),
        }
    }

    /// Number of blocks in the image.
    pub fn block_count(&self) -> usize {
        self.pixels.block_count()
    }

    /// Size of one encoded block.
    pub fn bytes_per_block(&self) -> usize {
        self.codec.codec.bytes_per_block()
    }

    /// Bytes written by a full compression.
    pub fn output_size(&self) -> usize {
        self.block_count() * self.bytes_per_block()
    }

    /// The codec run on every block.
    pub fn codec(&self) -> &ResolvedCodec {
        &self.codec
    }

    /// Number of threads to use.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Blocks per work queue job.
    pub fn job_size(&self) -> usize {
        self.job_size
    }

    /// How many times the image is compressed.
    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    /// Encodes the blocks of `range` into `out`, which holds exactly those blocks.
    pub(crate) fn encode_blocks(&self, range: ExecutionJob, out: &mut [u8], record_stats: bool) {
        let bytes_per_block = self.bytes_per_block();
        debug_assert_eq!(out.len(), range.block_count * bytes_per_block);

        let stats = if record_stats { self.stats } else { None };
        for (offset, encoded) in out.chunks_exact_mut(bytes_per_block).enumerate() {
            let block_index = range.first_block + offset;
            let block = self.pixels.block(block_index);
            match stats {
                Some(stats) => {
                    if let Some(block_stats) = self.codec.codec.encode_with_stats_into(&block, encoded) {
                        stats.record(BlockStatsRecord::new(block_index, block_stats));
                    }
                }
                None => self.codec.codec.encode_into(&block, encoded),
            }
        }
    }
}

/// How blocks are distributed across threads.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AllValues)]
pub enum ExecutionStrategy {
    /// Every block on the calling thread.
    Serial,
    /// Every thread compresses the whole image, starting together at a barrier.
    AtomicBarrier,
    /// One contiguous chunk of blocks per thread.
    ThreadGroup,
    /// Threads pull fixed size jobs from a shared queue.
    WorkerQueue,
}

impl ExecutionStrategy {
    /// Picks the strategy for `settings`.
    ///
    /// In priority order: 1 thread runs serially, atomics select the barrier benchmark,
    /// a non-zero job size selects the worker queue, otherwise a thread group.
    pub fn select(settings: &CompressionSettings) -> Self {
        if settings.threads() <= 1 {
            ExecutionStrategy::Serial
        } else if settings.use_atomics() {
            ExecutionStrategy::AtomicBarrier
        } else if settings.job_size() > 0 {
            ExecutionStrategy::WorkerQueue
        } else {
            ExecutionStrategy::ThreadGroup
        }
    }

    /// Human readable name.
    pub const fn name(self) -> &'static str {
        match self {
            ExecutionStrategy::Serial => "Serial",
            ExecutionStrategy::AtomicBarrier => "Atomic Barrier",
            ExecutionStrategy::ThreadGroup => "Thread Group",
            ExecutionStrategy::WorkerQueue => "Worker Queue",
        }
    }

    /// Compresses `job` into `output`, returning the average time per repetition in
    /// milliseconds.
    ///
    /// Returns only once every worker has finished.
    ///
    /// # Errors
    ///
    /// - [`CompressError::OutputBufferTooSmall`] if `output` cannot hold every block
    /// - [`CompressError::ThreadSpawn`] if a worker thread could not be started
    /// - [`CompressError::AllocationFailed`] if [`ExecutionStrategy::AtomicBarrier`] could not
    ///   allocate its per-thread buffers
    pub fn run(self, job: &CompressionJob<'_>, output: &mut [u8]) -> Result<f64, CompressError> {
        let needed = job.output_size();
        if output.len() < needed {
            return Err(CompressError::OutputBufferTooSmall {
                needed,
                actual: output.len(),
            });
        }
        let output = &mut output[..needed];

        match self {
            ExecutionStrategy::Serial => Ok(serial::run(job, output)),
            ExecutionStrategy::AtomicBarrier => atomic_barrier::run(job, output),
            ExecutionStrategy::ThreadGroup => thread_group::run(job, output),
            ExecutionStrategy::WorkerQueue => worker_queue::run(job, output),
        }
    }
}

impl fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
